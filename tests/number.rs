mod common;
use common::tests;

tests!(literals in number is OK "123" "123.456" "0" "-0");

tests!(nan_equality in number is OK "false" "true");

tests!(trailing_dot in number is ERR
    "[line 1:1] Error: Unterminated number");
