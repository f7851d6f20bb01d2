//! Shared helpers for the behaviour suites.
//!
//! `locale` parses quoted language values out of step text so scenarios can
//! feed them straight into selection and configuration.
pub mod locale;
