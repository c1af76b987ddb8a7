//! Main application modules.
//!
//! This module provides report formatting and run statistics logging used by
//! the main application.

pub mod report;
pub mod statistics;

// Re-export public API
pub use report::{format_report, Report};
pub use statistics::log_error_statistics;
