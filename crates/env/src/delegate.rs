//! Delegate command execution

use getsecret_core::{EnvironmentVariables, Error, Result, DELEGATE_SHELL, NOOP_COMMAND};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Run `command` through the shell with exactly `env` as its environment.
///
/// Standard streams are inherited. Returns the child's exit code, or
/// `128 + signal` when the child was killed by a signal. The command `noop`
/// is not executed and reports success.
pub async fn run_delegate(command: &str, env: &EnvironmentVariables) -> Result<i32> {
    if command.trim() == NOOP_COMMAND {
        tracing::debug!("noop delegate, skipping execution");
        return Ok(0);
    }

    tracing::debug!(command = %command, "executing delegate command");
    let mut cmd = Command::new(DELEGATE_SHELL);
    cmd.arg("-c")
        .arg(command)
        .env_clear()
        .envs(env.iter_os())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let status = cmd.status().await.map_err(|e| {
        Error::command_execution(command, format!("failed to spawn command: {e}"))
    })?;

    Ok(exit_code(status))
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
