mod common;
use common::tests;

tests!(add in operator is OK
    "3" "ab" "4" "12" "4" "-5" "false" "true" "true" "true" "true" "true" "true" "false");

tests!(add_mismatch in operator is ERR
    "[line 0:8] Error at '+': Operands must be two numbers or two strings.");

tests!(minus_mismatch in operator is ERR
    "[line 0:8] Error at '-': Operands must be numbers.");

tests!(negate_mismatch in operator is ERR
    "[line 0:6] Error at '-': Operand must be a number.");
