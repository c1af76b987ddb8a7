//! Error handling.
//!
//! This module provides the typed errors for the two failure tiers:
//! - **Fatal**: configuration problems (unsupported scheme, invalid URL,
//!   logger setup) that stop the run before any request is sent
//! - **Per-request**: connect, write, read, or status-line failures that are
//!   logged and folded into the measurement instead of aborting the run

mod types;

// Re-export public API
pub use types::{EndpointError, InitializationError, RequestError, RequestPhase};
