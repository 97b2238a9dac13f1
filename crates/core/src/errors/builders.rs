//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

impl Error {
    /// Create an unknown option error
    #[must_use]
    pub fn unknown_option(option: impl Into<String>) -> Self {
        Error::UnknownOption {
            option: option.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid reference error for an environment variable
    #[must_use]
    pub fn invalid_reference(variable: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidReference {
            variable: variable.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported feature error
    #[must_use]
    pub fn unsupported(feature: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Unsupported {
            feature: feature.into(),
            message: message.into(),
        }
    }

    /// Create a secret not found error
    #[must_use]
    pub fn secret_not_found(secret_id: impl Into<String>) -> Self {
        Error::SecretNotFound {
            secret_id: secret_id.into(),
        }
    }

    /// Create a secret resolution error
    #[must_use]
    pub fn secret_resolution(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a secret resolution error with a source error
    #[must_use]
    pub fn secret_resolution_with_source(
        reference: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::SecretResolution {
            reference: reference.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a role assumption error with a source error
    #[must_use]
    pub fn assume_role(
        role_arn: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::AssumeRole {
            role_arn: role_arn.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(command: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CommandExecution {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Whether the backend reported the secret as missing
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SecretNotFound { .. })
    }
}
