//! The secret backend abstraction

use async_trait::async_trait;
use getsecret_core::{Error, Result};

/// Value of a fetched secret. Secrets Manager stores either a string or a
/// binary payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretPayload {
    Text(String),
    Binary(Vec<u8>),
}

impl SecretPayload {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            SecretPayload::Text(text) => text.is_empty(),
            SecretPayload::Binary(bytes) => bytes.is_empty(),
        }
    }

    /// Decode the payload to text; binary payloads must be valid UTF-8.
    pub fn into_text(self, secret_id: &str) -> Result<String> {
        match self {
            SecretPayload::Text(text) => Ok(text),
            SecretPayload::Binary(bytes) => String::from_utf8(bytes).map_err(|e| {
                Error::secret_resolution_with_source(
                    secret_id,
                    "binary secret is not valid UTF-8",
                    e,
                )
            }),
        }
    }
}

/// Trait for fetching secrets from a backend
///
/// Sources are immutable. [`SecretSource::assume_role`] consumes the receiver
/// and hands back either the same source or a new one bound to temporary
/// credentials, so concurrent fetches never observe a credential change.
#[async_trait]
pub trait SecretSource: Send + Sync + Sized {
    /// Fetch the current value of `secret_id`.
    ///
    /// # Returns
    /// * `Ok(payload)` - The secret value
    /// * `Err(Error::SecretNotFound)` - The backend has no such secret
    /// * `Err(error)` - Any other backend failure
    async fn fetch(&self, secret_id: &str) -> Result<SecretPayload>;

    /// Exchange the configured role for temporary credentials.
    ///
    /// Returns `self` unchanged when no role is configured or the exchange
    /// yields no credentials.
    async fn assume_role(self) -> Result<Self>;
}
