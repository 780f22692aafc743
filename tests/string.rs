mod common;
use common::tests;

tests!(literals in string is OK "hello" "" "ab");

tests!(unterminated in string is ERR
    "[line 1:1] Error: Unterminated string");
