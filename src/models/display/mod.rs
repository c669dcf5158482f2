//! Display model implementations for pretty, table, and JSON output

mod check;

pub use check::{CheckDisplay, JobDisplay, ResultDisplay};
