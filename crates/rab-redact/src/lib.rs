//! Censoring engine for reportabug.
//!
//! This crate removes personally identifying substrings (username,
//! hostname) from a collected report before it leaves the machine:
//!
//! - **Censoring**: a pure structural transform that replaces every
//!   occurrence of every listed substring with its placeholder, recursing
//!   through nested mappings and sequences without mutating the input.
//! - **Fingerprinting**: a one-way summary of each censored word (content
//!   hash plus character categories) so a maintainer can compare redacted
//!   values across reports without recovering the original.
//!
//! # Example
//!
//! ```
//! use rab_redact::{censor, censor_word, CensorTable};
//! use serde_json::json;
//!
//! let mut table = CensorTable::new();
//! table.push("alice", "$USER");
//!
//! let data = json!({"who": "alice logged in"});
//! assert_eq!(censor(&data, &table), json!({"who": "$USER logged in"}));
//!
//! // Stable, non-reversible fingerprint of the censored word.
//! assert!(censor_word("alice").starts_with("sha256=`"));
//! ```

pub mod censor;
pub mod fingerprint;

pub use censor::{censor, CensorTable};
pub use fingerprint::censor_word;
