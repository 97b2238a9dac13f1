//! Option parsing for aws-get-secret
//!
//! Options come from a flat token list with per-option fallbacks read from
//! `AWS_GET_SECRET_*` environment variables. Everything after the first
//! non-option token is kept verbatim as the delegate command line.

pub mod args;
pub mod options;
pub mod validation;

pub use args::{parse, OptionSpec, OptionValue, ParsedArgs};
pub use options::Options;
