// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::warn;
use tokio::fs;

use crate::{
    error::{self, Result},
    metadata,
};

use super::{IsPersistent, Storage};

type Entries = BTreeMap<String, String>;

/// Stores every key in one JSON object on disk. Updates are written to a
/// sibling file first and renamed into place.
pub(crate) struct File {
    path: PathBuf,
}

impl File {
    pub(crate) fn new<P: AsRef<Path>>(file: P) -> Option<Self> {
        metadata::PROJECT_DIRS
            .as_ref()
            .map(|dirs| Self::at(dirs.data_dir().join(file)))
    }

    pub(crate) fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<Option<Entries>> {
        match fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|source| {
                error::Storage::Malformed {
                    path: self.path.clone(),
                    source,
                }
                .into()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`File::read`], but a file that is not a JSON object counts as
    /// empty so that the next write replaces it.
    async fn read_for_update(&self) -> Result<Option<Entries>> {
        match self.read().await {
            Err(error::Error::Storage(error::Storage::Malformed { path, source })) => {
                warn!(
                    "Replacing unreadable session file {}: {}",
                    path.display(),
                    source
                );
                Ok(None)
            }
            result => result,
        }
    }

    async fn write(&self, entries: &Entries) -> Result<()> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path).await {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec(entries)?).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
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
        Ok(self
            .read()
            .await?
            .and_then(|mut entries| entries.remove(key)))
    }

    async fn set(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut current = self.read_for_update().await?.unwrap_or_default();
        for (key, value) in entries {
            let _ = current.insert((*key).to_owned(), (*value).to_owned());
        }
        self.write(&current).await
    }

    async fn remove(&mut self, keys: &[&str]) -> Result<()> {
        let mut current = self.read_for_update().await?.unwrap_or_default();
        for key in keys {
            let _ = current.remove(*key);
        }
        self.write(&current).await
    }
}
