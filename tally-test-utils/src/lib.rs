//! Test utilities shared across the tally workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary configuration files ([`ConfigFileGuard`])
//! - Temporary home directories holding a `.netrc` ([`NetrcGuard`])
//! - Jira REST payload builders ([`jira`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod jira;
pub mod netrc;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use netrc::NetrcGuard;
