//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownOption { option } => write!(f, "Unknown option {option}"),
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::InvalidReference { variable, message } => {
                write!(
                    f,
                    "failed to parse environment variable '{variable}': {message}"
                )
            }
            Error::Unsupported { feature, message } => {
                write!(f, "unsupported feature '{feature}': {message}")
            }
            Error::SecretNotFound { secret_id } => {
                write!(f, "secret '{secret_id}' was not found")
            }
            Error::SecretResolution {
                reference, message, ..
            } => {
                write!(f, "failed to retrieve secret '{reference}': {message}")
            }
            Error::AssumeRole {
                role_arn, message, ..
            } => {
                write!(f, "failed to assume role '{role_arn}': {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::CommandExecution { command, message } => {
                write!(f, "command '{command}' failed: {message}")
            }
        }
    }
}
