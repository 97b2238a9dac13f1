//! Core domain types, errors, and constants for `aws-get-secret`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias shared by every
//!   crate in the workspace.
//! - **`types`**: `EnvironmentVariables`, the ordered environment snapshot that
//!   is threaded through scanning, resolution and delegate execution.
//! - **`constants`**: reference prefix, option environment variables and
//!   defaults.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
