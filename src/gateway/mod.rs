// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The request pipeline shared by every backend client.
//!
//! Each [`Gateway`] is one client instance. Instances differ only in their
//! [`Profile`], which decides whether the session's bearer token is attached
//! and whether a 401/403 answer evicts the session.

mod error;
pub(crate) mod transport;

use std::{sync::Arc, time::Duration};

use log::{debug, error, warn};
use serde_json::Value;
use url::Url;

use crate::{api::Endpoint, session::SessionStore};

pub(crate) use error::{ApiError, DIAGNOSIS_NOT_COMPLETED};
pub(crate) use transport::{Failure, Http, Method, Request, Response, Transport};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
    /// Also recognize diagnosis-not-completed failures by message text when
    /// the backend sends no code.
    pub(crate) legacy_keyword_detection: bool,
}

impl Config {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            legacy_keyword_detection: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Profile {
    pub(crate) name: &'static str,
    pub(crate) attach_credentials: bool,
    pub(crate) evict_on_auth_failure: bool,
}

impl Profile {
    pub(crate) const API: Self = Self {
        name: "api",
        attach_credentials: true,
        evict_on_auth_failure: true,
    };

    /// Login and registration legitimately answer 401 without a session to
    /// evict.
    pub(crate) const AUTH: Self = Self {
        name: "auth",
        attach_credentials: false,
        evict_on_auth_failure: false,
    };

    pub(crate) const ROOMS: Self = Self {
        name: "rooms",
        attach_credentials: true,
        evict_on_auth_failure: true,
    };
}

pub(crate) struct Gateway {
    config: Arc<Config>,
    profile: Profile,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl Gateway {
    pub(crate) fn new(
        config: Arc<Config>,
        profile: Profile,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            config,
            profile,
            transport,
            session,
        }
    }

    pub(crate) const fn profile(&self) -> Profile {
        self.profile
    }

    /// Sends one request and decodes its answer. Every failure comes back as
    /// an [`ApiError`].
    pub(crate) async fn call<E: Endpoint>(
        &self,
        endpoint: E,
    ) -> Result<E::Response, ApiError> {
        let req = self.build(&endpoint).await?;
        debug!(
            "[{}] {:?} {}",
            self.profile.name,
            req.method,
            req.url.path()
        );

        let resp = match self.transport.send(req).await {
            Ok(resp) => resp,
            Err(Failure::NoResponse(reason)) => {
                warn!("[{}] No response from the backend: {}", self.profile.name, reason);
                return Err(ApiError::no_response());
            }
            Err(Failure::NotSent(reason)) => {
                warn!("[{}] Request could not be sent: {}", self.profile.name, reason);
                return Err(ApiError::not_sent(Some(&reason)));
            }
        };

        if resp.is_success() {
            return serde_json::from_slice(&resp.body).map_err(|e| {
                warn!(
                    "[{}] Could not decode a {} response: {}",
                    self.profile.name, resp.status, e
                );
                ApiError::unreadable(resp.status)
            });
        }

        Err(self.reject(resp).await)
    }

    async fn build<E: Endpoint>(&self, endpoint: &E) -> Result<Request, ApiError> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::not_sent(Some("base URL cannot carry a path")))?;
            let _ = segments.pop_if_empty().extend(endpoint.segments());
        }

        let body = endpoint
            .body()
            .map_err(|e| ApiError::not_sent(Some(&e.to_string())))?;

        let bearer = if self.profile.attach_credentials {
            match self.session.token().await {
                Ok(token) => token,
                Err(e) => {
                    warn!(
                        "[{}] Sending without credentials: {}",
                        self.profile.name, e
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Request {
            method: E::METHOD,
            url,
            body,
            bearer,
        })
    }

    async fn reject(&self, resp: Response) -> ApiError {
        let data = if resp.body.is_empty() {
            None
        } else {
            Some(
                serde_json::from_slice::<Value>(&resp.body).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&resp.body).into_owned())
                }),
            )
        };

        let err = ApiError::from_response(
            resp.status,
            data,
            resp.reason.as_deref(),
            self.config.legacy_keyword_detection,
        );

        if err.is_auth_failure() && self.profile.evict_on_auth_failure {
            if let Err(e) = self.session.evict().await {
                error!(
                    "[{}] We could not remove the rejected session from storage: {}",
                    self.profile.name, e
                );
            }
        }

        debug!(
            "[{}] Backend rejected the request with {}: {}",
            self.profile.name,
            err.status(),
            err.message()
        );
        err
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        api::Executor as _,
        error::Result,
        session::{
            tests::{identity, ready_store},
            Token, TOKEN_KEY, USER_KEY,
        },
        storage::{Memory, Storage as _},
    };

    /// A recorded request, with the token exposed for assertions.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Sent {
        pub(crate) method: Method,
        pub(crate) path: String,
        pub(crate) body: Option<Value>,
        pub(crate) bearer: Option<String>,
    }

    /// Answers requests from a queue and records what was sent.
    #[derive(Default)]
    pub(crate) struct Scripted {
        answers: Mutex<VecDeque<Result<Response, Failure>>>,
        sent: Mutex<Vec<Sent>>,
    }

    impl Scripted {
        pub(crate) fn answer(self, status: u16, body: Value) -> Self {
            self.push(Ok(Response {
                status,
                reason: None,
                body: serde_json::to_vec(&body).unwrap_or_default(),
            }))
        }

        pub(crate) fn fail(self, failure: Failure) -> Self {
            self.push(Err(failure))
        }

        pub(crate) fn push(self, answer: Result<Response, Failure>) -> Self {
            self.answers
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push_back(answer);
            self
        }

        pub(crate) fn sent(&self) -> Vec<Sent> {
            self.sent
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn send(&self, req: Request) -> Result<Response, Failure> {
            self.sent
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(Sent {
                    method: req.method,
                    path: req.url.path().to_owned(),
                    body: req.body,
                    bearer: req.bearer.map(|t| t.expose().to_owned()),
                });
            self.answers
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Err(Failure::NoResponse("script exhausted".to_owned())))
        }
    }

    pub(crate) fn config() -> Arc<Config> {
        #[allow(clippy::unwrap_used)]
        let base_url = Url::parse("http://localhost:3000/api").unwrap();
        Arc::new(Config::new(base_url))
    }

    pub(crate) async fn logged_in(storage: Memory) -> Result<Arc<SessionStore>> {
        let store = Arc::new(ready_store(storage).await);
        store.login(identity(), Token::new("tok-123")).await?;
        Ok(store)
    }

    pub(crate) fn gateway(
        profile: Profile,
        transport: &Arc<Scripted>,
        session: &Arc<SessionStore>,
    ) -> Gateway {
        let transport = Arc::clone(transport);
        let transport: Arc<dyn Transport> = transport;
        Gateway::new(config(), profile, transport, Arc::clone(session))
    }

    #[tokio::test]
    async fn attaches_token_from_session() -> Result<()> {
        let session = logged_in(Memory::new()).await?;
        let transport = Arc::new(Scripted::default().answer(200, json!([])));

        let recs = crate::api::analysis::GetPersonalRecommendations {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::API, &transport, &session))
        .await?;

        assert!(recs.0.is_empty());
        assert_eq!(
            transport.sent(),
            vec![Sent {
                method: Method::Get,
                path: "/api/recommendations/personal/u1".to_owned(),
                body: None,
                bearer: Some("tok-123".to_owned()),
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn sends_unauthenticated_without_session() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(Scripted::default().answer(200, json!({"trips": []})));

        let _ = crate::api::trips::GetSavedTrips {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::API, &transport, &session))
        .await?;

        assert_eq!(transport.sent()[0].bearer, None);
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_evicts_session() -> Result<()> {
        let mut storage = Memory::new();
        let session = logged_in(storage.clone()).await?;
        let transport = Arc::new(Scripted::default().answer(
            403,
            json!({"error": "FORBIDDEN", "message": "세션이 만료되었습니다"}),
        ));

        let err = crate::api::analysis::GetPersonalRecommendations {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::API, &transport, &session))
        .await
        .err();

        let err = err.ok_or(crate::error::Error::Command)?;
        assert_eq!(err.status(), 403);
        assert_eq!(err.message(), "세션이 만료되었습니다");
        assert_eq!(storage.get(USER_KEY).await?, None);
        assert_eq!(storage.get(TOKEN_KEY).await?, None);
        assert!(!session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn unauthorized_on_rooms_client_evicts_session() -> Result<()> {
        let mut storage = Memory::new();
        let session = logged_in(storage.clone()).await?;
        let transport = Arc::new(Scripted::default().answer(401, json!({"message": "invalid token"})));

        let result = crate::api::rooms::GetRoom {
            room_id: "r1".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await;

        assert_eq!(result.err().map(|e| e.status()), Some(401));
        assert_eq!(storage.get(TOKEN_KEY).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn auth_client_keeps_session_on_unauthorized() -> Result<()> {
        let mut storage = Memory::new();
        let session = logged_in(storage.clone()).await?;
        let transport = Arc::new(Scripted::default().answer(
            401,
            json!({"success": false, "message": "이메일 또는 비밀번호가 올바르지 않습니다"}),
        ));

        let result = crate::api::auth::Login {
            email: "a@b.com".to_owned(),
            password: secrecy::SecretString::new("wrong".to_owned()),
        }
        .execute(&gateway(Profile::AUTH, &transport, &session))
        .await;

        let err = result.err().ok_or(crate::error::Error::Command)?;
        assert_eq!(err.status(), 401);
        assert_eq!(err.message(), "이메일 또는 비밀번호가 올바르지 않습니다");
        assert_eq!(transport.sent()[0].bearer, None);
        assert_eq!(storage.get(TOKEN_KEY).await?.as_deref(), Some("tok-123"));
        assert!(session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn eviction_failure_still_rejects_with_api_error() -> Result<()> {
        use std::sync::atomic::Ordering;

        let storage = crate::session::tests::Faulty::default();
        let session = Arc::new(SessionStore::new(Box::new(storage.clone())));
        session.initialize().await;
        session.login(identity(), Token::new("tok")).await?;
        storage.fail_remove.store(true, Ordering::SeqCst);

        let transport = Arc::new(Scripted::default().answer(403, json!({})));
        let result = crate::api::users::GetUserProfile {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::API, &transport, &session))
        .await;

        assert_eq!(result.err().map(|e| e.status()), Some(403));
        assert!(!session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn network_failure_is_status_zero() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(
            Scripted::default().fail(Failure::NoResponse("operation timed out".to_owned())),
        );

        let err = crate::api::rooms::ListUserRooms {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await
        .err()
        .ok_or(crate::error::Error::Command)?;

        assert_eq!(err.status(), 0);
        assert_eq!(err.message(), error::NETWORK_MESSAGE);
        assert_eq!(err.data(), None);
        Ok(())
    }

    #[tokio::test]
    async fn construction_failure_uses_transport_message() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport =
            Arc::new(Scripted::default().fail(Failure::NotSent("builder error".to_owned())));

        let err = crate::api::rooms::GetRoom {
            room_id: "r1".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await
        .err()
        .ok_or(crate::error::Error::Command)?;

        assert_eq!((err.status(), err.message()), (0, "builder error"));
        Ok(())
    }

    #[tokio::test]
    async fn diagnosis_not_completed_is_flagged() -> Result<()> {
        let session = logged_in(Memory::new()).await?;
        let transport = Arc::new(Scripted::default().answer(
            400,
            json!({"error": "DIAGNOSIS_NOT_COMPLETED", "message": "진단이 필요합니다"}),
        ));

        let err = crate::api::analysis::GetPersonalRecommendations {
            user_id: "u1".to_owned(),
        }
        .execute(&gateway(Profile::API, &transport, &session))
        .await
        .err()
        .ok_or(crate::error::Error::Command)?;

        assert!(err.is_diagnosis_not_completed());
        assert_eq!(err.code(), Some(DIAGNOSIS_NOT_COMPLETED));
        assert!(session.is_authenticated().await?);
        Ok(())
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_text() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(Scripted::default().push(Ok(Response {
            status: 502,
            reason: Some("Bad Gateway".to_owned()),
            body: b"<html>upstream down</html>".to_vec(),
        })));

        let err = crate::api::rooms::GetRoom {
            room_id: "r1".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await
        .err()
        .ok_or(crate::error::Error::Command)?;

        assert_eq!(err.message(), "Bad Gateway");
        assert_eq!(
            err.data(),
            Some(&Value::String("<html>upstream down</html>".to_owned()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_success_body_is_an_api_error() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(Scripted::default().answer(200, json!({"unexpected": true})));

        let err = crate::api::rooms::GetRoom {
            room_id: "r1".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await
        .err()
        .ok_or(crate::error::Error::Command)?;

        assert_eq!(err.status(), 200);
        assert_eq!(err.message(), error::UNREADABLE_RESPONSE_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn path_segments_are_encoded() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(Scripted::default().answer(200, json!({"rooms": []})));

        let _ = crate::api::rooms::ListUserRooms {
            user_id: "a/b c".to_owned(),
        }
        .execute(&gateway(Profile::ROOMS, &transport, &session))
        .await?;

        assert_eq!(transport.sent()[0].path, "/api/rooms/user/a%2Fb%20c");
        Ok(())
    }
}
