// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{
    gateway::Method,
    model::{Ack, RecordSaved, SavedTrips, TripRecords},
};

use super::{json_body, segments, Endpoint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveTrip {
    pub(crate) user_id: String,
    pub(crate) trip_id: String,
}

impl Endpoint for SaveTrip {
    type Response = Ack;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["trips", "save"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnsaveTrip {
    pub(crate) user_id: String,
    pub(crate) trip_id: String,
}

impl Endpoint for UnsaveTrip {
    type Response = Ack;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["trips", "unsave"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

pub(crate) struct GetSavedTrips {
    pub(crate) user_id: String,
}

impl Endpoint for GetSavedTrips {
    type Response = SavedTrips;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["trips", "saved", self.user_id.as_str()])
    }
}

/// Keeps a free-form travel journal entry for a trip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveTripRecord {
    pub(crate) user_id: String,
    pub(crate) trip_id: String,
    pub(crate) record: Value,
}

impl Endpoint for SaveTripRecord {
    type Response = RecordSaved;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["records"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

pub(crate) struct GetTripRecords {
    pub(crate) user_id: String,
}

impl Endpoint for GetTripRecords {
    type Response = TripRecords;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["records", self.user_id.as_str()])
    }
}
