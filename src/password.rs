// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{ffi::OsString, path::Path};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::{error::Result, metadata};

#[derive(Debug, Default, Clone)]
pub(crate) struct Request {
    account: Option<String>,
    confirm: bool,
}

pub(crate) struct RequestBuilder {
    account: Option<String>,
    confirm: bool,
}

impl RequestBuilder {
    pub(crate) const fn new() -> Self {
        Self {
            account: None,
            confirm: false,
        }
    }

    pub(crate) fn with_account(mut self, account: &str) -> Self {
        self.account = Some(account.to_owned());
        self
    }

    /// Ask for the password twice, as when choosing a new one.
    pub(crate) const fn with_confirmation(mut self) -> Self {
        self.confirm = true;
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            account: self.account,
            confirm: self.confirm,
        }
    }
}

impl Request {
    fn description(&self) -> String {
        match self.account.as_deref() {
            Some(account) => format!("Enter the password for {account}."),
            None => "Enter your account password.".to_owned(),
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

pub(crate) struct PinentryPrompt {
    executable: Option<OsString>,
}

impl PinentryPrompt {
    pub(crate) const fn new() -> Self {
        Self { executable: None }
    }

    pub(crate) fn new_with_executable<P: AsRef<Path>>(executable: P) -> Self {
        Self {
            executable: Some(executable.as_ref().as_os_str().into()),
        }
    }
}

#[async_trait]
impl Prompt for PinentryPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        fn interact<'input>(
            mut input: pinentry::PassphraseInput<'input>,
            title: &'input str,
            description: &'input str,
            confirm: bool,
        ) -> Result<SecretString> {
            _ = input.required("A password is required to continue.");
            _ = input.with_title(title);
            _ = input.with_description(description);
            _ = input.with_prompt("Password");
            if confirm {
                _ = input.with_confirmation("Confirm password", "Passwords do not match.");
            }

            Ok(input.interact()?)
        }

        let title = format!("Password - {}", *metadata::CLIENT_DISPLAY_NAME);
        let description = req.description();

        let input = self
            .executable
            .as_ref()
            .and_then(pinentry::PassphraseInput::with_binary)
            .or_else(pinentry::PassphraseInput::with_default_binary)
            .map(|input| {
                task::spawn_blocking(move || interact(input, &title, &description, req.confirm))
            });

        Ok(match input {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        eprintln!("{}", req.description());

        let confirm = req.confirm;
        Ok(Some(
            task::spawn_blocking(move || -> Result<SecretString> {
                let password = rpassword::prompt_password("Password: ")?;
                if confirm && rpassword::prompt_password("Confirm password: ")? != password {
                    eprintln!("Passwords do not match.");
                    return Err(crate::error::Error::Cancelled);
                }
                Ok(SecretString::new(password))
            })
            .await??,
        ))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    struct Declines;

    #[async_trait]
    impl Prompt for Declines {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            Ok(None)
        }
    }

    struct Answers(&'static str);

    #[async_trait]
    impl Prompt for Answers {
        async fn prompt(&self, _: Request) -> Result<Option<SecretString>> {
            Ok(Some(SecretString::new(self.0.to_owned())))
        }
    }

    #[tokio::test]
    async fn chain_uses_first_answer() -> Result<()> {
        let chain: Vec<Box<dyn Prompt>> = vec![
            Box::new(Declines),
            Box::new(Answers("first")),
            Box::new(Answers("second")),
        ];

        let answer = chain
            .prompt(RequestBuilder::new().with_account("a@b.com").into_request())
            .await?;
        assert_eq!(answer.as_ref().map(|s| s.expose_secret().as_str()), Some("first"));
        Ok(())
    }

    #[tokio::test]
    async fn chain_of_decliners_yields_nothing() -> Result<()> {
        let chain: Vec<Box<dyn Prompt>> = vec![Box::new(Declines)];
        assert!(chain.prompt(Request::default()).await?.is_none());
        Ok(())
    }

    #[test]
    fn description_names_account() {
        let req = RequestBuilder::new().with_account("a@b.com").into_request();
        assert_eq!(req.description(), "Enter the password for a@b.com.");
    }
}
