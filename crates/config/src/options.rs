//! Typed wrapper options resolved from the command line and environment

use crate::args::{self, OptionSpec};
use crate::validation::{validate_role_arn, validate_session_name};
use getsecret_core::{
    EnvironmentVariables, Error, Result, DEFAULT_REGION, DEFAULT_SESSION_NAME, DEFAULT_TIMEOUT_MS,
    REGION_VAR, ROLE_VAR, SESSION_NAME_VAR, TIMEOUT_VAR, VERBOSE_VAR,
};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Options for a single wrapper invocation. Built once at start-up and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Options {
    /// Region for Secrets Manager and STS
    pub region: String,
    /// Role to assume before fetching secrets
    #[serde(rename = "role")]
    pub role_arn: Option<String>,
    /// Session name passed to STS
    pub session_name: String,
    /// Per-operation timeout of backend calls
    #[serde(serialize_with = "serialize_millis")]
    pub timeout: Duration,
    pub verbose: bool,
    /// Delegate command line, executed through a shell
    pub command: String,
}

fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

fn timeout_from_millis(timeout_ms: f64) -> Result<Duration> {
    let invalid = || {
        Error::configuration(format!(
            "timeout must be a positive number of milliseconds, got {timeout_ms}"
        ))
    };
    if !timeout_ms.is_finite() || timeout_ms <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(timeout_ms / 1000.0).map_err(|_| invalid())
}

impl Options {
    /// The declared option schema
    #[must_use]
    pub fn schema() -> Vec<OptionSpec> {
        vec![
            OptionSpec::text("region", &["r"], DEFAULT_REGION, REGION_VAR),
            OptionSpec::text("role", &["a"], "", ROLE_VAR),
            OptionSpec::text("session-name", &["n"], DEFAULT_SESSION_NAME, SESSION_NAME_VAR),
            OptionSpec::number("timeout", &["t"], DEFAULT_TIMEOUT_MS, TIMEOUT_VAR),
            OptionSpec::flag("verbose", &["v"], false, VERBOSE_VAR),
        ]
    }

    /// Parse command-line tokens (program name excluded) with fallbacks from
    /// `env`, then validate the result.
    pub fn from_args(tokens: &[String], env: &EnvironmentVariables) -> Result<Self> {
        let parsed = args::parse(tokens, &Self::schema(), env)?;

        let timeout = timeout_from_millis(parsed.number("timeout")?)?;

        let role_arn = Some(parsed.text("role")?.trim())
            .filter(|role| !role.is_empty())
            .map(str::to_string);

        let options = Self {
            region: parsed.text("region")?.trim().to_string(),
            role_arn,
            session_name: parsed.text("session-name")?.trim().to_string(),
            timeout,
            verbose: parsed.flag("verbose")?,
            command: parsed.remainder().to_string(),
        };
        options.validate()?;
        Ok(options)
    }

    /// Reject settings STS or Secrets Manager would refuse anyway
    pub fn validate(&self) -> Result<()> {
        if self.region.is_empty() {
            return Err(Error::configuration(
                "you must supply a valid region: -r REGION [-a ROLE_ARN -t TIMEOUT_MS -n SESSION_NAME]",
            ));
        }
        validate_session_name(&self.session_name)?;
        if let Some(role_arn) = &self.role_arn {
            validate_role_arn(role_arn)?;
        }
        if self.command.trim().is_empty() {
            return Err(Error::configuration(
                "you must supply a command to run, for example: aws-get-secret -- echo $SECRET",
            ));
        }
        Ok(())
    }
}
