// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::{gateway::Method, model::LoginResponse};

use super::{json_body, segments, Endpoint};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Serialize)]
pub(crate) struct Register {
    pub(crate) email: String,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
    pub(crate) name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation: Option<String>,
}

impl Endpoint for Register {
    type Response = LoginResponse;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["auth", "register"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Serialize)]
pub(crate) struct Login {
    pub(crate) email: String,
    #[serde(serialize_with = "expose")]
    pub(crate) password: SecretString,
}

impl Endpoint for Login {
    type Response = LoginResponse;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["auth", "login"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        api::Executor as _,
        error::Result,
        gateway::{
            tests::{gateway, Scripted},
            Profile,
        },
        session::tests::{identity, ready_store},
        storage::Memory,
    };

    #[tokio::test]
    async fn register_omits_missing_generation() -> Result<()> {
        let session = Arc::new(ready_store(Memory::new()).await);
        let transport = Arc::new(Scripted::default().answer(
            201,
            json!({
                "success": true,
                "message": "회원가입 성공",
                "user": {"id": "u1", "email": "a@b.com", "name": "A"},
                "token": "tok-123",
            }),
        ));

        let resp = Register {
            email: "a@b.com".to_owned(),
            password: SecretString::new("hunter2".to_owned()),
            name: "A".to_owned(),
            generation: None,
        }
        .execute(&gateway(Profile::AUTH, &transport, &session))
        .await?;

        assert_eq!(resp.user, identity());
        assert_eq!(resp.token, "tok-123");
        assert_eq!(
            transport.sent()[0].body,
            Some(json!({"email": "a@b.com", "password": "hunter2", "name": "A"}))
        );
        assert_eq!(transport.sent()[0].path, "/api/auth/register");
        Ok(())
    }
}
