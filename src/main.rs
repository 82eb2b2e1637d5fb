// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod client;
mod command;
mod error;
mod gateway;
mod metadata;
mod model;
mod password;
mod session;
mod storage;

use std::{path::PathBuf, process, sync::Arc, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{debug, error, warn};
use url::Url;

use crate::{
    client::Clients,
    command::{account, analysis, rooms, trips, Context},
    gateway::{Http, Transport},
    session::SessionStore,
    storage::{IsPersistent as _, Storage},
};

#[derive(Debug, Subcommand)]
enum Command {
    Login(account::Login),
    Register(account::Register),
    Logout(account::Logout),
    Whoami(account::Whoami),
    Profile(account::Profile),
    Analyze(analysis::Analyze),
    Plan(analysis::Plan),
    TalkingGuide(analysis::TalkingGuide),
    Recommend(analysis::Recommend),
    Trips(trips::Trips),
    Rooms(rooms::Rooms),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(ctx).await,
            Self::Register(cmd) => cmd.execute(ctx).await,
            Self::Logout(cmd) => cmd.execute(ctx).await,
            Self::Whoami(cmd) => cmd.execute(ctx).await,
            Self::Profile(cmd) => cmd.execute(ctx).await,
            Self::Analyze(cmd) => cmd.execute(ctx).await,
            Self::Plan(cmd) => cmd.execute(ctx).await,
            Self::TalkingGuide(cmd) => cmd.execute(ctx).await,
            Self::Recommend(cmd) => cmd.execute(ctx).await,
            Self::Trips(cmd) => cmd.execute(ctx).await,
            Self::Rooms(cmd) => cmd.execute(ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the backend API. Every endpoint path is resolved
    /// relative to it.
    #[arg(long, env = "GENTRIP_API_URL", default_value = "http://localhost:3000/api", value_parser = Url::parse)]
    api_url: Url,

    /// How long to wait for the backend to respond, in seconds.
    #[arg(long, env = "GENTRIP_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Keep the login session in memory only, forgetting it when the command
    /// exits.
    #[arg(long)]
    no_persist_session: bool,

    /// Only treat a failure as "diagnosis not completed" when the backend
    /// sends the explicit error code, ignoring the message text.
    #[arg(long)]
    no_legacy_keyword_detection: bool,

    /// The path to the Pinentry program to use when asking for your account
    /// password.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn Storage> {
    if !args.no_persist_session {
        match storage::File::new("session.json") {
            Some(file_storage) => return Box::new(file_storage),
            None => warn!(
                "We need to fall back to in-memory session storage: {}",
                error::Storage::NoProjectDirs
            ),
        }
    }

    Box::new(storage::Memory::new())
}

fn gateway_config(args: &Args) -> Result<gateway::Config> {
    if args.api_url.cannot_be_a_base() {
        error!("The URL {} cannot be used as an API base URL", args.api_url);
        return Err(error::Error::Command);
    }

    let mut config = gateway::Config::new(args.api_url.clone());
    config.timeout = Duration::from_secs(args.timeout);
    config.legacy_keyword_detection = !args.no_legacy_keyword_detection;
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let config = gateway_config(&args)?;

    let storage = get_session_storage(&args);
    if !storage.is_persistent() {
        warn!("The login session will not be kept after this command exits");
    }
    let session = Arc::new(SessionStore::new(storage));
    let mut phases = session.subscribe();
    let _watcher = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            debug!("The session is now {:?}", *phases.borrow_and_update());
        }
    });
    session.initialize().await;
    debug!("Loaded the session store: {:?}", session.phase());

    let transport: Arc<dyn Transport> = Arc::new(Http::new(config.timeout)?);
    let ctx = Context {
        clients: Clients::new(config, transport, session),
        prompt: Box::new(prompt),
    };

    command::Command::execute(args.command, &ctx).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("GENTRIP_LOG", "warn")
        .write_style("GENTRIP_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        if let error::Error::Api(ref api) = e {
            debug!(
                "The backend rejected the request with status {}, code {:?}, data {:?}",
                api.status(),
                api.code(),
                api.data()
            );
            if api.is_diagnosis_not_completed() {
                eprintln!("Complete the travel diagnosis first with `gentrip analyze`.");
            }
        }
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
