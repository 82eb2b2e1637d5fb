// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tabled::{settings::Style, Table, Tabled};

use crate::{client::Clients, error::Result, password::Prompt};

pub(crate) mod account;
pub(crate) mod analysis;
pub(crate) mod rooms;
pub(crate) mod trips;

pub(crate) struct Context {
    pub(crate) clients: Clients,
    pub(crate) prompt: Box<dyn Prompt>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: &Context) -> Result<()>;
}

pub(crate) async fn read_json<T: DeserializeOwned, P: AsRef<Path> + Send>(path: P) -> Result<T> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) async fn write_json<T: Serialize + Sync, P: AsRef<Path> + Send>(
    path: P,
    value: &T,
) -> Result<()> {
    tokio::fs::write(path, serde_json::to_vec_pretty(value)?).await?;
    Ok(())
}

pub(crate) fn print_table<I, T>(rows: I)
where
    I: IntoIterator<Item = T>,
    T: Tabled,
{
    println!("{}", Table::new(rows).with(Style::rounded()));
}
