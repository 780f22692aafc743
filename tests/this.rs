mod common;
use common::tests;

tests!(top_level in this is ERR
    "[line 0:6] Error at 'this': Cannot use 'this' outside of a class.");
