mod common;
use common::tests;

tests!(basic in class is OK "Bagel" "Bagel instance");

tests!(method_this in class is OK "The German chocolate cake is delicious!");

tests!(undefined_property in class is ERR
    "[line 2:10] Error at 'bar': Undefined property 'bar'.");
