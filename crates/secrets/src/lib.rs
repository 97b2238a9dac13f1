//! Secret reference resolution
//!
//! Environment variables whose value starts with `aws:///` are secret
//! references. This crate parses them, fetches the referenced secrets through
//! a [`SecretSource`] and materializes each value as an environment pair or a
//! file on disk.

pub mod aws;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
mod reference;
mod resolver;
mod scanner;
mod source;


pub use aws::AwsSecretSource;
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemorySecretSource;
pub use reference::{ReferenceParams, SecretReference};
pub use resolver::{resolve_all, Resolution};
pub use scanner::find_all;
pub use source::{SecretPayload, SecretSource};
