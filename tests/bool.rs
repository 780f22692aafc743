mod common;
use common::tests;

tests!(basic in bool is OK "true" "false" "true" "false" "false");
