//! In-memory secret source for tests

use crate::source::{SecretPayload, SecretSource};
use async_trait::async_trait;
use getsecret_core::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Entry {
    Value(SecretPayload),
    /// Readable only while holding `credentials`
    Scoped {
        payload: SecretPayload,
        credentials: String,
    },
    Failure(String),
}

/// A [`SecretSource`] backed by a map.
///
/// Unknown ids report `SecretNotFound`. Role assumption hands out the
/// configured credential label, mirroring how the AWS source swaps clients.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretSource {
    entries: HashMap<String, Entry>,
    role_arn: Option<String>,
    granted_credentials: Option<String>,
    credentials: Option<String>,
    fetches: Arc<AtomicUsize>,
}

impl InMemorySecretSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_secret(mut self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(
            secret_id.into(),
            Entry::Value(SecretPayload::Text(value.into())),
        );
        self
    }

    #[must_use]
    pub fn with_binary(mut self, secret_id: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(
            secret_id.into(),
            Entry::Value(SecretPayload::Binary(value.into())),
        );
        self
    }

    /// Add a secret readable only with the credentials handed out by
    /// [`SecretSource::assume_role`]
    #[must_use]
    pub fn with_scoped_secret(
        mut self,
        secret_id: impl Into<String>,
        value: impl Into<String>,
        credentials: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            secret_id.into(),
            Entry::Scoped {
                payload: SecretPayload::Text(value.into()),
                credentials: credentials.into(),
            },
        );
        self
    }

    /// Make fetches of `secret_id` fail with a backend error other than "not found"
    #[must_use]
    pub fn with_failure(
        mut self,
        secret_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.entries
            .insert(secret_id.into(), Entry::Failure(message.into()));
        self
    }

    /// Configure a role; `credentials` is what the exchange returns, if anything
    #[must_use]
    pub fn with_role(mut self, role_arn: impl Into<String>, credentials: Option<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self.granted_credentials = credentials;
        self
    }

    /// Credentials currently in use, `None` for the default identity
    #[must_use]
    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    #[must_use]
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Number of fetches made through this source and every source derived from it
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretSource for InMemorySecretSource {
    async fn fetch(&self, secret_id: &str) -> Result<SecretPayload> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match self.entries.get(secret_id) {
            Some(Entry::Value(payload)) => Ok(payload.clone()),
            Some(Entry::Scoped {
                payload,
                credentials,
            }) if self.credentials.as_ref() == Some(credentials) => Ok(payload.clone()),
            Some(Entry::Scoped { .. }) => Err(Error::secret_resolution(
                secret_id,
                "AccessDeniedException: not authorized with the current credentials",
            )),
            Some(Entry::Failure(message)) => {
                Err(Error::secret_resolution(secret_id, message.clone()))
            }
            None => Err(Error::secret_not_found(secret_id)),
        }
    }

    async fn assume_role(self) -> Result<Self> {
        if self.role_arn.as_deref().map_or(true, str::is_empty) {
            return Ok(self);
        }
        match self.granted_credentials.clone() {
            Some(credentials) => Ok(Self {
                credentials: Some(credentials),
                ..self
            }),
            None => Ok(self),
        }
    }
}
