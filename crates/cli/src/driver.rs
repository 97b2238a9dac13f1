//! Wrapper entry flow: assume role, scan, resolve, materialize, execute

use getsecret_config::Options;
use getsecret_core::{EnvironmentVariables, Result};
use getsecret_env::{materialize, run_delegate};
use getsecret_secrets::{find_all, resolve_all, SecretSource};

/// Resolve every secret reference in `env` and return the delegate environment.
///
/// All-or-nothing: if any reference fails, the error is returned and no
/// environment is produced. `env` itself is never modified.
pub async fn prepare_environment<S: SecretSource>(
    source: S,
    env: &EnvironmentVariables,
) -> Result<EnvironmentVariables> {
    let source = source.assume_role().await?;

    let references = find_all(env)?;
    tracing::info!(
        references = ?references
            .iter()
            .map(|r| format!("{}={}", r.variable, r.secret_id))
            .collect::<Vec<_>>(),
        "discovered secret references"
    );

    let resolutions = resolve_all(&references, &source).await?;
    Ok(materialize(env, &resolutions))
}

/// Prepare the environment, then run the delegate command and return its exit code.
pub async fn run<S: SecretSource>(
    options: &Options,
    source: S,
    env: &EnvironmentVariables,
) -> Result<i32> {
    tracing::info!(
        options = %serde_json::to_string(options).unwrap_or_default(),
        "aws-get-secret"
    );

    let merged = prepare_environment(source, env).await?;
    run_delegate(&options.command, &merged).await
}
