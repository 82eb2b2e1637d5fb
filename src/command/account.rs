// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::{error, info};

use crate::{
    api::{auth, users, Executor as _},
    error::{self, Result},
    model::LoginResponse,
    password::{Prompt as _, RequestBuilder},
    session::Token,
};

use super::{print_table, Context};

async fn adopt(ctx: &Context, resp: LoginResponse) -> Result<()> {
    if ctx.clients.session.is_authenticated().await? {
        info!("Replacing the current session");
    }
    if !resp.message.is_empty() {
        info!("{}", resp.message);
    }
    let name = resp.user.name.clone();
    ctx.clients
        .session
        .login(resp.user, Token::new(resp.token))
        .await?;
    println!("Logged in as {name}.");
    Ok(())
}

/// Log in with an existing account.
#[derive(Debug, Parser)]
pub(crate) struct Login {
    /// The email address of the account.
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for Login {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let password = ctx
            .prompt
            .prompt(RequestBuilder::new().with_account(&self.email).into_request())
            .await?
            .ok_or(error::Password::NoPrompt)?;

        let resp = auth::Login {
            email: self.email,
            password,
        }
        .execute(&ctx.clients.auth)
        .await?;
        adopt(ctx, resp).await
    }
}

/// Create a new account and log in with it.
#[derive(Debug, Parser)]
pub(crate) struct Register {
    /// Your generation, e.g. "20대".
    #[arg(long, short)]
    generation: Option<String>,

    /// The email address to register.
    #[clap()]
    email: String,

    /// Your display name.
    #[clap()]
    name: String,
}

#[async_trait]
impl super::Command for Register {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let password = ctx
            .prompt
            .prompt(
                RequestBuilder::new()
                    .with_account(&self.email)
                    .with_confirmation()
                    .into_request(),
            )
            .await?
            .ok_or(error::Password::NoPrompt)?;

        let resp = auth::Register {
            email: self.email,
            password,
            name: self.name,
            generation: self.generation,
        }
        .execute(&ctx.clients.auth)
        .await?;
        adopt(ctx, resp).await
    }
}

/// Forget the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Logout {}

#[async_trait]
impl super::Command for Logout {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let result = ctx.clients.session.logout().await;
        println!("Logged out.");
        result.map_err(|e| {
            error!("The session could not be removed from storage: {}", e);
            e
        })
    }
}

/// Show who is logged in.
#[derive(Debug, Parser)]
pub(crate) struct Whoami {}

#[async_trait]
impl super::Command for Whoami {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let identity = ctx.clients.session.require_identity().await?;
        match identity.generation.as_deref() {
            Some(generation) => println!("{} <{}> ({generation})", identity.name, identity.email),
            None => println!("{} <{}>", identity.name, identity.email),
        }
        Ok(())
    }
}

/// Show your travel trait profile.
#[derive(Debug, Parser)]
pub(crate) struct Profile {}

#[async_trait]
impl super::Command for Profile {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let identity = ctx.clients.session.require_identity().await?;
        let profile = users::GetUserProfile {
            user_id: identity.id,
        }
        .execute(&ctx.clients.api)
        .await?;

        println!(
            "{} <{}>{}",
            profile.name,
            profile.email,
            profile
                .generation
                .map(|g| format!(" ({g})"))
                .unwrap_or_default()
        );
        print_table([profile.profile]);
        Ok(())
    }
}
