mod common;
use common::tests;

tests!(independent_counters in closure is OK "1" "2" "1");
