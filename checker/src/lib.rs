//! Catalog checker library.
//!
//! Backs the `tslocale-check` binary and can be driven programmatically.
//!
//! # Modules
//!
//! - [`check`] - Catalog validation and report rendering
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Checker error types
//! - [`resolve`] - Single-message resolution probe

pub mod check;
pub mod cli;
pub mod error;
pub mod resolve;

pub use check::{CatalogReport, CheckReport, DiagnosticLine, check};
pub use error::{CheckError, Result};
pub use resolve::resolve;
