mod common;
use common::tests;

tests!(basic in comment is OK "ok");
