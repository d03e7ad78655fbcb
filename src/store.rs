//! File storage behind the `/files/` routes.
//!
//! Every file lives directly under one base directory chosen at startup.
//! Without a base directory every operation fails.

use anyhow::{Context, Result, bail};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Reads the whole file `name` under the base directory.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }

    /// Replaces the contents of `name` under the base directory.
    ///
    /// Missing parent directories are not created.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, contents)
            .await
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let Some(root) = &self.root else {
            bail!("no file directory configured");
        };

        let relative = Path::new(name);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if name.is_empty() || !plain {
            bail!("invalid file name {:?}", name);
        }

        Ok(root.join(relative))
    }
}
