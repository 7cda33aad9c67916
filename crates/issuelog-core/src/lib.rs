//! issuelog Core - shared foundations for changelog generation
//!
//! This crate provides the error taxonomy, change-type vocabulary and
//! configuration loading used by the other issuelog crates.

pub mod config;
pub mod error;
pub mod types;
pub mod workflow;

pub use error::{ChangelogError, ConfigError, IssuelogError, Result, SourceError};
pub use types::{derive_heading, ChangeType, TypeMap};
pub use workflow::write_changelog;
