// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, io, path::PathBuf};

use async_trait::async_trait;

use crate::{error::Result, metadata};

use super::{IsPersistent, Storage};

/// Keeps each key in its own file inside a directory.
pub(crate) struct File {
    dir: PathBuf,
}

impl File {
    pub(crate) fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub(crate) fn in_project_dirs() -> Option<Self> {
        metadata::PROJECT_DIRS
            .as_ref()
            .map(|dirs| Self::new(dirs.data_dir()))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl Storage for File {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn values_survive_a_new_handle() -> Result<()> {
        let dir = TempDir::new()?;
        File::new(dir.path().join("nested"))
            .set("token", "abc123")
            .await?;

        let mut reopened = File::new(dir.path().join("nested"));
        assert_eq!(reopened.get("token").await?.as_deref(), Some("abc123"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<()> {
        let dir = TempDir::new()?;
        let mut storage = File::new(dir.path());
        storage.set("user", "{}").await?;

        storage.delete("user").await?;
        storage.delete("user").await?;
        assert_eq!(storage.get("user").await?, None);
        Ok(())
    }
}
