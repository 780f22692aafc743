mod common;
use common::tests;

tests!(nested in break is OK "x");

tests!(no_loop in break is ERR
    "[line 0:0] Error at 'break': Cannot break outside of a loop.");
