//! Unit tests for messaging module

#[cfg(test)]
pub mod create_gateway_tests;
