//! Error handling
//!
//! Defines error types and handling for saslauthd verification.

pub mod handlers;
pub mod types;

pub use handlers::{error_to_exit_code, handle_error};
pub use types::*;
