//! AWS Secrets Manager source with optional STS role assumption

use crate::source::{SecretPayload, SecretSource};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use getsecret_core::{Error, Result, DEFAULT_SESSION_NAME, MAX_BACKEND_ATTEMPTS};
use std::time::{Duration, SystemTime};

const CREDENTIALS_PROVIDER_NAME: &str = "AssumeRole";

/// Secrets Manager client scoped to one region and, after
/// [`SecretSource::assume_role`], to one set of temporary credentials.
#[derive(Debug, Clone)]
pub struct AwsSecretSource {
    region: String,
    role_arn: Option<String>,
    session_name: Option<String>,
    config: SdkConfig,
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretSource {
    /// Build a source from the default credential chain.
    ///
    /// Every backend call gets at most one automatic retry and is bounded by
    /// `timeout`.
    pub async fn new(
        region: impl Into<String>,
        role_arn: Option<String>,
        session_name: Option<String>,
        timeout: Duration,
    ) -> Self {
        let region = region.into();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(MAX_BACKEND_ATTEMPTS))
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            .load()
            .await;
        let client = aws_sdk_secretsmanager::Client::new(&config);

        Self {
            region,
            role_arn,
            session_name,
            config,
            client,
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Same region and role, new client bound to `credentials`
    fn with_credentials(&self, credentials: Credentials) -> Self {
        let config = self
            .config
            .to_builder()
            .credentials_provider(SharedCredentialsProvider::new(credentials))
            .build();
        let client = aws_sdk_secretsmanager::Client::new(&config);

        Self {
            region: self.region.clone(),
            role_arn: self.role_arn.clone(),
            session_name: self.session_name.clone(),
            config,
            client,
        }
    }
}

#[async_trait]
impl SecretSource for AwsSecretSource {
    async fn fetch(&self, secret_id: &str) -> Result<SecretPayload> {
        let output = match self.client.get_secret_value().secret_id(secret_id).send().await {
            Ok(output) => output,
            Err(err) => {
                let message = DisplayErrorContext(&err).to_string();
                return Err(match err.into_service_error() {
                    GetSecretValueError::ResourceNotFoundException(_) => {
                        Error::secret_not_found(secret_id)
                    }
                    other => Error::secret_resolution_with_source(secret_id, message, other),
                });
            }
        };

        if let Some(text) = output.secret_string() {
            return Ok(SecretPayload::Text(text.to_string()));
        }
        Ok(SecretPayload::Binary(
            output
                .secret_binary()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
        ))
    }

    async fn assume_role(self) -> Result<Self> {
        let Some(role_arn) = self.role_arn.clone().filter(|arn| !arn.is_empty()) else {
            return Ok(self);
        };
        let session_name = self
            .session_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string());

        let sts = aws_sdk_sts::Client::new(&self.config);
        let output = sts
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(&session_name)
            .send()
            .await
            .map_err(|e| {
                let message = aws_sdk_sts::error::DisplayErrorContext(&e).to_string();
                Error::assume_role(&role_arn, message, e)
            })?;

        let Some(credentials) = output.credentials() else {
            // Kept lenient: the default credential chain stays in use
            tracing::warn!(
                role_arn = %role_arn,
                "role assumption returned no credentials, continuing without them"
            );
            return Ok(self);
        };

        tracing::debug!(role_arn = %role_arn, session_name = %session_name, "assumed role");
        let expiry = SystemTime::try_from(*credentials.expiration()).ok();
        Ok(self.with_credentials(Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            Some(credentials.session_token().to_string()),
            expiry,
            CREDENTIALS_PROVIDER_NAME,
        )))
    }
}
