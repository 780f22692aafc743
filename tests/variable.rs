mod common;
use common::tests;

tests!(scoping in variable is OK "inner" "outer");

tests!(undefined in variable is ERR
    "[line 0:6] Error at 'notDefined': Undefined variable 'notDefined'.");

tests!(duplicate_local in variable is ERR
    "[line 2:4] Error at 'a': A variable is already defined with name 'a' in this scope.");

tests!(self_initializer in variable is ERR
    "[line 2:8] Error at 'a': Cannot read local variable in its own initializer.");
