//! # Tally CLI Library
//!
//! Argument parsing and the fetch, aggregate, render and save pipeline
//! behind the `tally` binary.

pub mod cli;
pub mod pipeline;
