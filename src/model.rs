// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Values exchanged with the backend.

use std::collections::{BTreeMap, HashMap};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::session::Identity;

/// One answered diagnosis question. Values are on a 0-100 scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserAnswer {
    pub(crate) question_id: u32,
    pub(crate) value: u8,
}

/// The five travel traits the backend scores.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Tabled)]
pub(crate) struct TraitScores {
    #[tabled(rename = "Speed")]
    pub(crate) speed: f64,
    #[tabled(rename = "Stamina")]
    pub(crate) stamina: f64,
    #[tabled(rename = "Budget")]
    pub(crate) budget: f64,
    #[tabled(rename = "Photo")]
    pub(crate) photo: f64,
    #[tabled(rename = "Tradition")]
    pub(crate) tradition: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct FoodBalance {
    pub(crate) traditional: f64,
    pub(crate) trendy: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Adjustments {
    pub(crate) schedule_speed: f64,
    pub(crate) food_balance: FoodBalance,
    pub(crate) photo_zone_optimization: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisResult {
    pub(crate) differences: TraitScores,
    pub(crate) user_profile: TraitScores,
    pub(crate) companion_profile: TraitScores,
    pub(crate) adjustments: Adjustments,
    pub(crate) summary: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) purposes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) preferred_places: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) companion_style: Option<String>,
}

/// A generated trip plan. Field names follow the backend's snake_case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct TripRecommendation {
    pub(crate) title: String,
    pub(crate) for_generation: String,
    pub(crate) course: Vec<String>,
    pub(crate) why: String,
    #[serde(default)]
    pub(crate) options: BTreeMap<String, String>,
    pub(crate) talking_tip: String,
    #[serde(default)]
    pub(crate) satisfaction: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TalkingGuide {
    #[serde(default)]
    pub(crate) suggestions: Vec<String>,
    #[serde(default)]
    pub(crate) tips: Vec<String>,
    #[serde(default)]
    pub(crate) topics: Vec<String>,
}

fn default_title() -> String {
    "추천 여행".to_owned()
}

/// A recommendation from the personal or room feeds. The backend has shipped
/// both snake_case and camelCase spellings for some fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Tabled)]
pub(crate) struct Recommendation {
    #[serde(default)]
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[serde(default = "default_title")]
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) description: Option<String>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) why: String,
    #[serde(default)]
    #[tabled(rename = "Course", display_with = "join_course")]
    pub(crate) course: Vec<String>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) satisfaction: BTreeMap<String, f64>,
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) options: BTreeMap<String, String>,
    #[serde(default, alias = "estimatedTime")]
    #[tabled(skip)]
    pub(crate) estimated_time: Option<String>,
    #[serde(default, alias = "estimatedCost")]
    #[tabled(skip)]
    pub(crate) estimated_cost: Option<String>,
    #[serde(default, alias = "talkingTip")]
    #[tabled(skip)]
    pub(crate) talking_tip: Option<String>,
}

impl Recommendation {
    pub(crate) fn summary(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.why)
    }
}

fn join_course(course: &[String]) -> String {
    course.join(" → ")
}

/// Deserializes a list, treating any other JSON value as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| T::deserialize(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Recommendations(pub(crate) Vec<Recommendation>);

impl<'de> Deserialize<'de> for Recommendations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_list(deserializer).map(Self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Ack {
    pub(crate) success: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordSaved {
    pub(crate) success: bool,
    pub(crate) record_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct TripRecords {
    #[serde(default)]
    pub(crate) records: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct SavedTrips {
    #[serde(default)]
    pub(crate) trips: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct UserProfile {
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) generation: Option<String>,
    pub(crate) profile: TraitScores,
}

/// The body of a successful login or registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) message: String,
    pub(crate) user: Identity,
    pub(crate) token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Room {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Invite Code")]
    pub(crate) invite_code: String,
    #[serde(default)]
    #[tabled(rename = "Invite Link")]
    pub(crate) invite_link: String,
    #[serde(default)]
    #[tabled(rename = "Participants", display_with = "count")]
    pub(crate) participants: Vec<String>,
    #[serde(default)]
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

fn count(items: &[String]) -> String {
    items.len().to_string()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct RoomEnvelope {
    #[serde(default)]
    pub(crate) success: Option<bool>,
    pub(crate) room: Room,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct Rooms {
    #[serde(default)]
    pub(crate) rooms: Vec<Room>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub(crate) struct Participants {
    #[serde(default)]
    pub(crate) participants: Vec<Value>,
}

fn anonymous() -> String {
    "사용자".to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Comment {
    #[serde(default)]
    #[tabled(skip)]
    pub(crate) id: String,
    #[serde(default = "anonymous")]
    #[tabled(rename = "Author")]
    pub(crate) user_name: String,
    #[serde(default)]
    #[tabled(rename = "Comment")]
    pub(crate) content: String,
    #[serde(default)]
    #[tabled(rename = "Posted")]
    pub(crate) created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct Comments {
    #[serde(default)]
    pub(crate) comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct CommentCreated {
    pub(crate) comment: Comment,
}

/// Vote totals keyed by trip identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct Votes {
    #[serde(default)]
    pub(crate) votes: HashMap<String, u32>,
}
