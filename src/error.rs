// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;

use crate::gateway::ApiError;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("storage error: {0}")]
    Storage(#[from] Storage),
    #[error("session error: {0}")]
    Session(#[from] Session),
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("HTTP client could not be constructed: {0}")]
    HttpClient(reqwest::Error),
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

#[derive(Error, Debug)]
pub(crate) enum Storage {
    #[error("no data directory is available for this user")]
    NoProjectDirs,
    #[error(r#"stored session file "{}" is not a JSON object: {}"#, .path.display(), .source)]
    Malformed {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub(crate) enum Session {
    #[error("session has not finished loading")]
    NotReady,
    #[error("you are not logged in (run `gentrip login` first)")]
    NotAuthenticated,
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}
