//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for aws-get-secret operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for aws-get-secret operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command-line token names an option missing from the schema
    UnknownOption { option: String },

    /// Configuration errors
    Configuration { message: String },

    /// Environment variable holds a malformed secret reference
    InvalidReference { variable: String, message: String },

    /// Unsupported operation errors
    Unsupported { feature: String, message: String },

    /// Backend reported that the secret does not exist
    SecretNotFound { secret_id: String },

    /// Secret resolution errors
    SecretResolution {
        reference: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Role assumption errors
    AssumeRole {
        role_arn: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// The delegate command could not be started
    CommandExecution { command: String, message: String },
}
