//! DAYCAST — hourly forecast digest.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod publish;
pub mod report;
pub mod source;
pub mod types;
