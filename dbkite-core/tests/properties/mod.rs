//! Property test suites

mod options_key_tests;
