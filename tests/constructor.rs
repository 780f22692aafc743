mod common;
use common::tests;

tests!(init_args in constructor is OK "1" "2");

tests!(default_no_init in constructor is OK "Foo instance");

tests!(early_return in constructor is OK "Foo instance");
