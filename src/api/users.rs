// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::{gateway::Method, model::UserProfile};

use super::{segments, Endpoint};

pub(crate) struct GetUserProfile {
    pub(crate) user_id: String,
}

impl Endpoint for GetUserProfile {
    type Response = UserProfile;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["users", self.user_id.as_str(), "profile"])
    }
}
