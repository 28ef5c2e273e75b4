use std::{io::ErrorKind, path::PathBuf};

use crate::{
    config,
    error::{Error, Result},
};

/// Keeps the PKCE code verifier on disk across the authorization redirect.
///
/// The verifier is written before the browser is sent to the provider and
/// read once when the authorization code comes back. It is removed right
/// after the exchange; a stale verifier is never reused.
#[derive(Debug, Clone)]
pub struct VerifierStore {
    path: PathBuf,
}

impl VerifierStore {
    pub fn new(path: PathBuf) -> Self {
        VerifierStore { path }
    }

    /// Store in the application's data directory.
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("state/verifier"))
    }

    pub async fn save(&self, verifier: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(&self.path, verifier).await?;
        Ok(())
    }

    pub async fn load(&self) -> Result<String> {
        match async_fs::read_to_string(&self.path).await {
            Ok(verifier) if !verifier.trim().is_empty() => Ok(verifier.trim().to_string()),
            Ok(_) => Err(Error::MissingVerifier),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::MissingVerifier),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Removes the stored verifier. Clearing an empty store is a no-op.
    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
