//! Integration test suite.
//!
//! 1. End-to-end commit and rollback scenarios
//! 2. Binding to borrowed, shared, and nested records
//! 3. JSON-backed records

pub mod binding_tests;
pub mod json_tests;
pub mod scenario_tests;
