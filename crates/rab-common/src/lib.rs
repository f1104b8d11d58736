//! Shared foundation for reportabug.
//!
//! This crate provides the types used across the reportabug crates:
//! - A unified error type for the thin layer where failure is real
//! - Output format specifications for the CLI
//! - The ambient-state provider, so collectors read environment variables,
//!   directory listings, and host identity through one narrow interface
//!   that tests can replace without touching process state

pub mod env;
pub mod error;
pub mod output;

pub use env::{EnvProvider, SystemEnv};
pub use error::{Error, Result};
pub use output::OutputFormat;

#[cfg(any(test, feature = "test-utils"))]
pub use env::StaticEnv;
