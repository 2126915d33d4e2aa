//! Integration test suites

mod registry_tests;
