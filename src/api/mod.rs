// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! One request type per backend operation.

pub(crate) mod analysis;
pub(crate) mod auth;
pub(crate) mod rooms;
pub(crate) mod trips;
pub(crate) mod users;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gateway::{ApiError, Gateway, Method};

pub(crate) trait Endpoint: Send + Sync {
    type Response: DeserializeOwned + Send;

    const METHOD: Method;

    /// Path below the configured base URL, one unescaped segment per entry.
    fn segments(&self) -> Vec<String>;

    fn body(&self) -> serde_json::Result<Option<Value>> {
        Ok(None)
    }
}

#[async_trait]
pub(crate) trait Executor: Endpoint + Sized {
    async fn execute(self, gateway: &Gateway) -> Result<Self::Response, ApiError> {
        gateway.call(self).await
    }
}

impl<T: Endpoint> Executor for T {}

/// Serializes a request value as its JSON body.
pub(crate) fn json_body<T: serde::Serialize>(value: &T) -> serde_json::Result<Option<Value>> {
    serde_json::to_value(value).map(Some)
}

fn segments<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.into_iter().map(str::to_owned).collect()
}
