mod common;
use common::tests;

tests!(top_level in super is ERR
    "[line 0:0] Error at 'super': Cannot use 'super' outside of a class.");
