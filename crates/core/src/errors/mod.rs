//! Error types for aws-get-secret operations

mod builders;
mod display;
mod types;

pub use types::{Error, Result};
