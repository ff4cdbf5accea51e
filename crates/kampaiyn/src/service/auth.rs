// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sign-in, registration, and the token refresh call.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Endpoint, Gateway, Refresher};
use crate::model::auth::{
    GoogleParams, LoginData, LoginParams, RefreshData, RefreshParams, RegisterData,
    RegisterParams,
};
use crate::model::user::User;
use crate::model::Envelope;
use crate::session::{SessionData, TokenPair};

pub struct AuthService {
    gateway: Arc<Gateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /auth/login`; on success the session holds the user and tokens.
    pub async fn login(&self, params: &LoginParams) -> Result<User, GatewayError> {
        let req = ApiRequest::post("/auth/login").json(params)?.skip_auth_refresh();
        let envelope: Envelope<LoginData> = self.gateway.send(req).await?.json()?;
        let user = self.start_session(envelope.into_data()?);
        tracing::info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// `POST /auth/register`. Returns the backend's confirmation message.
    pub async fn register(&self, params: &RegisterParams) -> Result<String, GatewayError> {
        let req = ApiRequest::post("/auth/register").json(params)?.skip_auth_refresh();
        let envelope: Envelope<RegisterData> = self.gateway.send(req).await?.json()?;
        if let Some(ref data) = envelope.data {
            tracing::info!(user_id = %data.user.id, "registered");
        }
        Ok(envelope.message)
    }

    /// `POST /auth/google` with a Google ID token; signs in like `login`.
    pub async fn google(&self, params: &GoogleParams) -> Result<User, GatewayError> {
        let req = ApiRequest::post("/auth/google").json(params)?.skip_auth_refresh();
        let envelope: Envelope<LoginData> = self.gateway.send(req).await?.json()?;
        let user = self.start_session(envelope.into_data()?);
        tracing::info!(user_id = %user.id, "logged in with google");
        Ok(user)
    }

    pub fn logout(&self) {
        self.gateway.session().clear();
        tracing::info!("logged out");
    }

    fn start_session(&self, data: LoginData) -> User {
        let user = data.user.clone();
        self.gateway.session().set_user(SessionData {
            user: data.user,
            access_token: data.access_token,
            refresh_token: data.refresh_token,
        });
        user
    }
}

/// `POST /auth/refresh`, issued on the bare endpoint so it never recurses
/// into the gateway's own 401 handling.
pub struct TokenRefresher {
    endpoint: Endpoint,
}

impl TokenRefresher {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn exchange(&self, refresh_token: &str) -> anyhow::Result<TokenPair> {
        if refresh_token.is_empty() {
            anyhow::bail!("no refresh token");
        }
        let req = ApiRequest::post("/auth/refresh")
            .json(&RefreshParams { refresh_token: refresh_token.to_owned() })?;
        let resp = self.endpoint.dispatch(&req).await?.into_result()?;
        let envelope: Envelope<RefreshData> = resp.json()?;
        let data = envelope.into_data()?;
        Ok(TokenPair::new(data.access_token, data.refresh_token))
    }
}

impl Refresher for TokenRefresher {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, anyhow::Result<TokenPair>> {
        Box::pin(self.exchange(refresh_token))
    }
}
