//! Environment handling for aws-get-secret
//!
//! Merges resolved secrets into a copy of the inherited environment and runs
//! the delegate command with it.

pub mod delegate;
pub mod materialize;

pub use delegate::run_delegate;
pub use materialize::materialize;
