mod common;
use common::tests;

tests!(recursion in function is OK "55");

tests!(closures in function is OK "1" "2");

tests!(print_repr in function is OK "<fn add>" "<native fn>");

tests!(arity_mismatch in function is ERR
    "[line 1:11] Error at ')': Expected 2 arguments but got 1.");

tests!(native_arity_mismatch in function is ERR
    "[line 0:13] Error at ')': Expected 0 arguments but got 1.");
