// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use futures_util::lock::Mutex;
use log::{debug, error, info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};

use crate::{
    error::{self, Result},
    storage::Storage,
};

pub(crate) const USER_KEY: &str = "user";
pub(crate) const TOKEN_KEY: &str = "token";

/// The authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Identity {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) generation: Option<String>,
}

/// An opaque bearer credential.
pub(crate) struct Token(SecretString);

impl Token {
    pub(crate) fn new<S: Into<String>>(value: S) -> Self {
        Self(SecretString::new(value.into()))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Loading,
    Ready { authenticated: bool },
}

#[derive(Default)]
struct State {
    ready: bool,
    identity: Option<Identity>,
    token: Option<Token>,
}

impl State {
    fn phase(&self) -> Phase {
        if self.ready {
            Phase::Ready {
                authenticated: self.identity.is_some() && self.token.is_some(),
            }
        } else {
            Phase::Loading
        }
    }
}

/// Owns the "who is logged in" state and keeps it in step with durable
/// storage.
///
/// The store starts out loading. [`SessionStore::initialize`] must complete
/// before any of the read accessors can be used; until then they return
/// [`error::Session::NotReady`].
pub(crate) struct SessionStore {
    storage: Mutex<Box<dyn Storage>>,
    state: RwLock<State>,
    operation: Mutex<()>,
    phase_tx: watch::Sender<Phase>,
}

impl SessionStore {
    pub(crate) fn new(storage: Box<dyn Storage>) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Loading);
        Self {
            storage: Mutex::new(storage),
            state: RwLock::new(State::default()),
            operation: Mutex::new(()),
            phase_tx,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        *self.phase_tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Loads any persisted session. This never fails: unusable persisted state
    /// is discarded and the store becomes ready without an identity.
    pub(crate) async fn initialize(&self) {
        let _operation = self.operation.lock().await;
        if self.state.read().await.ready {
            warn!("The session store has already been initialized; ignoring");
            return;
        }

        let restored = self.restore().await;

        let mut state = self.state.write().await;
        if let Some((identity, token)) = restored {
            info!("Restored session for {}", identity.email);
            state.identity = Some(identity);
            state.token = Some(token);
        }
        state.ready = true;
        self.publish(&state);
    }

    async fn restore(&self) -> Option<(Identity, Token)> {
        let mut storage = self.storage.lock().await;
        let user = storage.get(USER_KEY).await;
        let token = storage.get(TOKEN_KEY).await;

        let (user, token) = match (user, token) {
            (Ok(user), Ok(token)) => (
                user.filter(|v| !v.is_empty()),
                token.filter(|v| !v.is_empty()),
            ),
            (Err(e), _) | (_, Err(e)) => {
                error!("We could not read the stored session: {}", e);
                if let Err(e) = storage.remove(&[USER_KEY, TOKEN_KEY]).await {
                    error!("We could not clear the stored session either: {}", e);
                }
                return None;
            }
        };

        match (user, token) {
            (Some(user), Some(token)) => match serde_json::from_str::<Identity>(&user) {
                Ok(identity) => return Some((identity, Token::new(token))),
                Err(e) => warn!("Discarding stored session with a corrupted user record: {}", e),
            },
            (None, None) => {
                debug!("No stored session found");
                return None;
            }
            (Some(_), None) | (None, Some(_)) => warn!("Discarding a partially stored session"),
        }

        if let Err(e) = storage.remove(&[USER_KEY, TOKEN_KEY]).await {
            error!("We could not clear the stored session: {}", e);
        }
        None
    }

    /// Persists and adopts a new session. Memory is only updated once both
    /// values are durably stored.
    pub(crate) async fn login(&self, identity: Identity, token: Token) -> Result<()> {
        let _operation = self.operation.lock().await;
        self.ensure_ready().await?;

        let user = serde_json::to_string(&identity)?;
        self.storage
            .lock()
            .await
            .set(&[(USER_KEY, user.as_str()), (TOKEN_KEY, token.expose())])
            .await?;

        let mut state = self.state.write().await;
        state.identity = Some(identity);
        state.token = Some(token);
        self.publish(&state);
        Ok(())
    }

    /// Ends the session. In-memory state is cleared before storage is touched,
    /// so the store reports no identity even if the removal fails.
    pub(crate) async fn logout(&self) -> Result<()> {
        let _operation = self.operation.lock().await;
        self.clear().await
    }

    /// Drops the session after the backend rejected its credentials.
    pub(crate) async fn evict(&self) -> Result<()> {
        let _operation = self.operation.lock().await;
        info!("Evicting the stored session");
        self.clear().await
    }

    async fn clear(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.identity = None;
            state.token = None;
            self.publish(&state);
        }

        self.storage
            .lock()
            .await
            .remove(&[USER_KEY, TOKEN_KEY])
            .await
    }

    pub(crate) async fn identity(&self) -> Result<Option<Identity>> {
        let state = self.state.read().await;
        Self::check_ready(&state)?;
        Ok(state.identity.clone())
    }

    pub(crate) async fn token(&self) -> Result<Option<Token>> {
        let state = self.state.read().await;
        Self::check_ready(&state)?;
        Ok(state.token.clone())
    }

    pub(crate) async fn is_authenticated(&self) -> Result<bool> {
        let state = self.state.read().await;
        Self::check_ready(&state)?;
        Ok(state.identity.is_some() && state.token.is_some())
    }

    /// The current identity, or an error telling the user to log in.
    pub(crate) async fn require_identity(&self) -> Result<Identity> {
        self.identity()
            .await?
            .ok_or_else(|| error::Session::NotAuthenticated.into())
    }

    async fn ensure_ready(&self) -> Result<()> {
        Self::check_ready(&*self.state.read().await)
    }

    fn check_ready(state: &State) -> Result<()> {
        if state.ready {
            Ok(())
        } else {
            Err(error::Session::NotReady.into())
        }
    }

    fn publish(&self, state: &State) {
        let _ = self.phase_tx.send_replace(state.phase());
    }
}
