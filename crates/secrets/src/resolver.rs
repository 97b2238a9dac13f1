//! Resolution of secret references against a source

use crate::reference::SecretReference;
use crate::source::{SecretPayload, SecretSource};
use futures::future::try_join_all;
use getsecret_core::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Outcome of resolving one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Set `key` to `value` in the delegate environment
    Env { key: String, value: String },
    /// The secret was written to `path`
    File { path: PathBuf },
}

impl SecretReference {
    /// Fetch the referenced secret and materialize it.
    ///
    /// A missing secret falls back to the `default` parameter when one is
    /// given; every other failure is returned unchanged. With a `destination`
    /// the value is written to disk and no environment pair is produced.
    pub async fn handle<S: SecretSource>(&self, source: &S) -> Result<Resolution> {
        let payload = match source.fetch(&self.secret_id).await {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => match &self.params.default {
                Some(default) => {
                    tracing::debug!(
                        variable = %self.variable,
                        secret_id = %self.secret_id,
                        "secret not found, using default"
                    );
                    SecretPayload::Text(default.clone())
                }
                None => return Err(e),
            },
            Err(e) => return Err(e),
        };

        let payload = match &self.params.default {
            Some(default) if payload.is_empty() => SecretPayload::Text(default.clone()),
            _ => payload,
        };
        let value = payload.into_text(&self.secret_id)?;

        match &self.params.destination {
            Some(path) => {
                write_secret_file(path, &value, self.params.chmod).await?;
                tracing::debug!(
                    variable = %self.variable,
                    path = %path.display(),
                    "wrote secret to file"
                );
                Ok(Resolution::File { path: path.clone() })
            }
            None => Ok(Resolution::Env {
                key: self.variable.clone(),
                value,
            }),
        }
    }
}

/// Resolve all references concurrently.
///
/// Results keep the order of `references`. The first failure aborts the join;
/// files already written by other references are left in place.
pub async fn resolve_all<S: SecretSource>(
    references: &[SecretReference],
    source: &S,
) -> Result<Vec<Resolution>> {
    try_join_all(references.iter().map(|reference| reference.handle(source))).await
}

async fn write_secret_file(path: &Path, contents: &str, mode: Option<u32>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::file_system(parent, "create directory", e))?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        if let Some(mode) = mode {
            options.mode(mode);
        }
    }

    let mut file = options
        .open(path)
        .await
        .map_err(|e| Error::file_system(path, "open", e))?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(|e| Error::file_system(path, "write", e))?;
    file.flush()
        .await
        .map_err(|e| Error::file_system(path, "flush", e))?;

    // The creation mode is masked by umask and ignored for existing files
    if let Some(mode) = mode {
        set_mode(path, mode).await?;
    }
    Ok(())
}

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .map_err(|e| Error::file_system(path, "chmod", e))
}

#[cfg(not(unix))]
async fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    tracing::warn!(path = %path.display(), "chmod is not supported on this platform");
    Ok(())
}
