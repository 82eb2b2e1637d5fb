// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{
    gateway::Method,
    model::{
        AnalysisResult, Recommendations, TalkingGuide, TripRecommendation, UserAnswer,
        UserPreferences,
    },
};

use super::{json_body, segments, Endpoint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeDifference {
    pub(crate) user_answers: Vec<UserAnswer>,
    pub(crate) user_generation: String,
    pub(crate) companion_generation: String,
}

impl Endpoint for AnalyzeDifference {
    type Response = AnalysisResult;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["analyze"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecommendTrip {
    pub(crate) user_generation: String,
    pub(crate) companion_generation: String,
    pub(crate) preferences: UserPreferences,
    pub(crate) analysis: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) travel_style: Option<String>,
}

impl Endpoint for RecommendTrip {
    type Response = TripRecommendation;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["recommend"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetTalkingGuide {
    pub(crate) user_generation: String,
    pub(crate) companion_generation: String,
    pub(crate) recommendation: TripRecommendation,
}

impl Endpoint for GetTalkingGuide {
    type Response = TalkingGuide;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["talking-guide"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

pub(crate) struct GetPersonalRecommendations {
    pub(crate) user_id: String,
}

impl Endpoint for GetPersonalRecommendations {
    type Response = Recommendations;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["recommendations", "personal", self.user_id.as_str()])
    }
}

pub(crate) struct GetRoomRecommendations {
    pub(crate) room_id: String,
}

impl Endpoint for GetRoomRecommendations {
    type Response = Recommendations;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["recommendations", "room", self.room_id.as_str()])
    }
}
