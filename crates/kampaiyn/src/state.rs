// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::error::GatewayError;
use crate::gateway::{Endpoint, Gateway, GatewayEvent};
use crate::service::{
    ApplicationService, AuthService, CampaignService, RecommendationService, TaskService,
    TokenRefresher, UserService,
};
use crate::session::persist::SESSION_FILE;
use crate::session::SessionStore;

/// One session's worth of client plumbing: the session store, the gateway
/// in front of the REST backend, and the services built on both.
pub struct ClientState {
    pub session: Arc<SessionStore>,
    pub gateway: Arc<Gateway>,
    pub auth: AuthService,
    pub users: UserService,
    pub campaigns: CampaignService,
    pub applications: ApplicationService,
    pub tasks: TaskService,
    pub recommendations: RecommendationService,
}

impl ClientState {
    pub fn new(
        api_base_url: &str,
        ml_base_url: &str,
        session: Arc<SessionStore>,
    ) -> Result<Self, GatewayError> {
        let primary = Endpoint::primary(api_base_url)?;
        let refresher = Arc::new(TokenRefresher::new(primary.clone()));
        let (event_tx, _) = broadcast::channel(16);
        let gateway = Gateway::new(primary, Arc::clone(&session), refresher, event_tx);

        Ok(Self {
            session,
            auth: AuthService::new(Arc::clone(&gateway)),
            users: UserService::new(Arc::clone(&gateway)),
            campaigns: CampaignService::new(Arc::clone(&gateway)),
            applications: ApplicationService::new(Arc::clone(&gateway)),
            tasks: TaskService::new(Arc::clone(&gateway)),
            recommendations: RecommendationService::new(Endpoint::recommendation(ml_base_url)?),
            gateway,
        })
    }

    /// Build from CLI config with the session persisted under the state dir.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let path = config.resolve_state_dir().join(SESSION_FILE);
        let session = Arc::new(SessionStore::persistent(path));
        Self::new(&config.api_base_url, &config.ml_base_url, session)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.gateway.subscribe()
    }
}
