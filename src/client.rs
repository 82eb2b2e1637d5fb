// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use crate::{
    gateway::{Config, Gateway, Profile, Transport},
    session::SessionStore,
};

/// The per-resource backend clients, all sharing one session and transport.
pub(crate) struct Clients {
    pub(crate) session: Arc<SessionStore>,
    pub(crate) api: Gateway,
    pub(crate) auth: Gateway,
    pub(crate) rooms: Gateway,
}

impl Clients {
    pub(crate) fn new(
        config: Config,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> Self {
        let config = Arc::new(config);
        let gateway = |profile| {
            Gateway::new(
                Arc::clone(&config),
                profile,
                Arc::clone(&transport),
                Arc::clone(&session),
            )
        };

        Self {
            api: gateway(Profile::API),
            auth: gateway(Profile::AUTH),
            rooms: gateway(Profile::ROOMS),
            session: Arc::clone(&session),
        }
    }
}
