// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Influencer recommendations from the ML backend.
//!
//! The ML backend is unauthenticated; calls go straight to its endpoint
//! without credential stamping or refresh handling.

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Endpoint};
use crate::model::recommendation::{RecommendationParams, RecommendationResponse};

/// Shown when the backend gives no reason of its own.
pub const FALLBACK_MESSAGE: &str = "failed to get recommendations";

pub struct RecommendationService {
    endpoint: Endpoint,
}

impl RecommendationService {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// `GET /recommend`.
    pub async fn get(
        &self,
        params: &RecommendationParams,
    ) -> Result<RecommendationResponse, GatewayError> {
        let req = ApiRequest::get("/recommend").query_pairs(params.query_pairs());
        let resp = self.endpoint.dispatch(&req).await?.into_result()?;
        resp.json()
    }
}

/// User-facing text for a failed recommendation call.
pub fn failure_message(err: &GatewayError) -> String {
    err.message_or(FALLBACK_MESSAGE)
}
