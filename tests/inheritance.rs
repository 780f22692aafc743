mod common;
use common::tests;

tests!(basic in inheritance is OK "Fry until golden brown.");

tests!(super_call in inheritance is OK
    "Fry until golden brown."
    "Pipe full of custard and coat with chocolate.");

tests!(superclass_not_class in inheritance is ERR
    "[line 1:17] Error at 'NotAClass': Superclass must be a class.");
