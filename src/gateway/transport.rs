// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::{
    error::{self, Result},
    metadata,
    session::Token,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) body: Option<Value>,
    pub(crate) bearer: Option<Token>,
}

#[derive(Debug)]
pub(crate) struct Response {
    pub(crate) status: u16,
    /// Canonical reason phrase for the status, when one exists.
    pub(crate) reason: Option<String>,
    pub(crate) body: Vec<u8>,
}

impl Response {
    pub(crate) const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Failure {
    /// Sent, but no (complete) response arrived.
    NoResponse(String),
    /// The request never left the client.
    NotSent(String),
}

#[async_trait]
pub(crate) trait Transport: Send + Sync {
    async fn send(&self, req: Request) -> Result<Response, Failure>;
}

pub(crate) struct Http {
    client: reqwest::Client,
}

impl Http {
    pub(crate) fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(metadata::USER_AGENT.as_str())
            .timeout(timeout)
            .build()
            .map_err(error::Error::HttpClient)?;
        Ok(Self { client })
    }
}

fn classify(err: &reqwest::Error) -> Failure {
    if err.is_builder() {
        Failure::NotSent(err.to_string())
    } else {
        Failure::NoResponse(err.to_string())
    }
}

#[async_trait]
impl Transport for Http {
    async fn send(&self, req: Request) -> Result<Response, Failure> {
        let mut builder = self.client.request(req.method.into(), req.url);
        if let Some(token) = req.bearer.as_ref() {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = req.body.as_ref() {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| classify(&e))?;
        let status = resp.status();
        debug!("Backend answered with {}", status);
        let body = resp.bytes().await.map_err(|e| classify(&e))?;

        Ok(Response {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_owned),
            body: body.to_vec(),
        })
    }
}
