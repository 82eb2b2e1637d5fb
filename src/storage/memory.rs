// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

use super::{IsPersistent, Storage};

/// Process-local storage. Clones share the same underlying map.
#[derive(Clone, Default)]
pub(crate) struct Memory {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl Memory {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl IsPersistent for Memory {
    fn is_persistent(&self) -> bool {
        false
    }
}

#[async_trait]
impl Storage for Memory {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        let guard = self.data.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn set(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        let mut guard = self.data.write().await;
        for (key, value) in entries {
            let _ = guard.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    async fn remove(&mut self, keys: &[&str]) -> Result<()> {
        let mut guard = self.data.write().await;
        for key in keys {
            let _ = guard.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_contents() -> Result<()> {
        let mut first = Memory::new();
        let mut second = first.clone();

        first.set(&[("user", "a"), ("token", "b")]).await?;
        assert_eq!(second.get("token").await?.as_deref(), Some("b"));

        second.remove(&["user", "token"]).await?;
        assert_eq!(first.get("user").await?, None);
        Ok(())
    }
}
