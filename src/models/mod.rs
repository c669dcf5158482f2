//! Display models for CLI output
//!
//! Converts API records and formatted check metadata into shapes suited for
//! pretty, table, and JSON output.

pub mod display;

pub use display::{CheckDisplay, JobDisplay, ResultDisplay};
