//! Parsing of `aws:///<secret-id>?<params>` references

use getsecret_core::{EnvironmentVariables, Error, Result};
use std::path::PathBuf;
use url::Url;

/// Query parameters of a secret reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceParams {
    /// Value used when the secret does not exist (or is empty)
    pub default: Option<String>,
    /// File to write the secret to instead of the environment
    pub destination: Option<PathBuf>,
    /// Mode bits applied to `destination`
    pub chmod: Option<u32>,
}

/// A secret reference read from one environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    /// Variable the reference was read from
    pub variable: String,
    /// Secret name or ARN
    pub secret_id: String,
    pub params: ReferenceParams,
}

impl SecretReference {
    /// Parse the reference held by `variable`.
    ///
    /// `$VAR` and `${VAR}` in `value` are expanded against `env` first; unset
    /// variables expand to nothing. A `template` parameter is rejected: template
    /// rendering is not available in this runtime.
    pub fn parse(variable: &str, value: &str, env: &EnvironmentVariables) -> Result<Self> {
        let expanded = shellexpand::env_with_context_no_errors(value, |name: &str| {
            Some(match env.get(name) {
                Some(found) => found.clone(),
                None => {
                    tracing::debug!(
                        variable = %variable,
                        missing = %name,
                        "environment variable is not set, expanding to empty string"
                    );
                    String::new()
                }
            })
        });

        let url = Url::parse(&expanded)
            .map_err(|e| Error::invalid_reference(variable, format!("invalid secret URI: {e}")))?;

        let mut default = None;
        let mut destination = None;
        let mut chmod = None;
        let mut template = false;
        for (key, param) in url.query_pairs() {
            // First occurrence wins
            match key.as_ref() {
                "default" if default.is_none() => default = Some(param.into_owned()),
                "destination" if destination.is_none() => destination = Some(param.into_owned()),
                "chmod" if chmod.is_none() => chmod = Some(param.into_owned()),
                "template" => template = true,
                _ => {}
            }
        }

        if template {
            return Err(Error::unsupported(
                "template",
                format!(
                    "environment variable '{variable}': \
                     template secret replacements are not supported in this mode"
                ),
            ));
        }

        let secret_id = url.path().trim_start_matches('/').to_string();
        if secret_id.is_empty() {
            return Err(Error::invalid_reference(
                variable,
                "secret URI has no secret id, expected aws:///<secret-id>",
            ));
        }

        let chmod = chmod
            .filter(|mode| !mode.is_empty())
            .map(|mode| {
                u32::from_str_radix(&mode, 8).map_err(|e| {
                    Error::invalid_reference(
                        variable,
                        format!("chmod '{mode}' is not valid octal: {e}"),
                    )
                })
            })
            .transpose()?;

        let destination = destination.filter(|d| !d.is_empty()).map(PathBuf::from);
        if destination.is_none() && chmod.is_some() {
            tracing::debug!(variable = %variable, "chmod has no effect without a destination");
        }

        Ok(Self {
            variable: variable.to_string(),
            secret_id,
            params: ReferenceParams {
                default,
                destination,
                chmod,
            },
        })
    }
}
