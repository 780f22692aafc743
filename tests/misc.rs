mod common;
use common::tests;

tests!(precedence in misc is OK "14" "20" "-5" "1" "true" "true");

tests!(unexpected_character in misc is ERR
    "[line 2:9] Error: Unexpected character '@'");

tests!(missing_semicolon in misc is ERR
    "[line 0:8] Error at '1': Expect ';' after variable decleration");
