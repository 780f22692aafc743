mod common;
use common::tests;

tests!(top_level in return is ERR
    "[line 0:0] Error at 'return': Cannot return from top-level code.");

tests!(init_value in return is ERR
    "[line 2:0] Error at 'return': Cannot return a value from an initializer.");
