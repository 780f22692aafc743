mod common;
use common::tests;

tests!(if_while_for in control_flow is OK
    "yes" "no" "0" "1" "2" "0" "1" "2");
