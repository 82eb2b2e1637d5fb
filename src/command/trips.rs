// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::warn;
use serde_json::Value;

use crate::{
    api::{trips, Executor as _},
    error::Result,
};

use super::{read_json, Context};

#[derive(Debug, Subcommand)]
enum Action {
    /// List the trips you have saved.
    Saved,
    /// Save a recommended trip.
    Save {
        #[clap()]
        trip_id: String,
    },
    /// Remove a trip from your saved list.
    Unsave {
        #[clap()]
        trip_id: String,
    },
    /// List your travel journal entries.
    Records,
    /// Add a travel journal entry for a trip from a JSON file.
    Record {
        #[clap()]
        trip_id: String,

        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

/// Manage saved trips and travel records.
#[derive(Debug, Parser)]
pub(crate) struct Trips {
    #[command(subcommand)]
    action: Action,
}

fn print_values(values: &[Value], empty: &str) -> Result<()> {
    if values.is_empty() {
        println!("{empty}");
    }
    for value in values {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

#[async_trait]
impl super::Command for Trips {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let user_id = ctx.clients.session.require_identity().await?.id;

        match self.action {
            Action::Saved => {
                let saved = trips::GetSavedTrips { user_id }
                    .execute(&ctx.clients.api)
                    .await?;
                print_values(&saved.trips, "No saved trips.")
            }
            Action::Save { trip_id } => {
                let ack = trips::SaveTrip { user_id, trip_id }
                    .execute(&ctx.clients.api)
                    .await?;
                if !ack.success {
                    warn!("The backend did not confirm the trip was saved");
                }
                Ok(())
            }
            Action::Unsave { trip_id } => {
                let ack = trips::UnsaveTrip { user_id, trip_id }
                    .execute(&ctx.clients.api)
                    .await?;
                if !ack.success {
                    warn!("The backend did not confirm the trip was removed");
                }
                Ok(())
            }
            Action::Records => {
                let records = trips::GetTripRecords { user_id }
                    .execute(&ctx.clients.api)
                    .await?;
                print_values(&records.records, "No travel records.")
            }
            Action::Record { trip_id, file } => {
                let record: Value = read_json(&file).await?;
                let saved = trips::SaveTripRecord {
                    user_id,
                    trip_id,
                    record,
                }
                .execute(&ctx.clients.api)
                .await?;
                println!("Saved record {}.", saved.record_id);
                Ok(())
            }
        }
    }
}
