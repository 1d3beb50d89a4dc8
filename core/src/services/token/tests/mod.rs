mod support;

mod purge_tests;
