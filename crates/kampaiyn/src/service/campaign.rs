// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Campaign CRUD and applications, through the gateway.

use std::sync::Arc;

use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::model::campaign::{
    ApplicationList, ApplyParams, CampaignData, CampaignList, CampaignQuery,
};
use crate::model::user::Role;
use crate::model::Envelope;

pub const CREATE_FAILED: &str = "failed to create campaign";
pub const FETCH_FAILED: &str = "failed to get campaigns";
pub const UPDATE_FAILED: &str = "failed to update campaign";
pub const DELETE_FAILED: &str = "failed to delete campaign";
pub const APPLY_FAILED: &str = "failed to apply to campaign";

pub struct CampaignService {
    gateway: Arc<Gateway>,
}

impl CampaignService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /campaigns`.
    pub async fn create(&self, campaign: &Value) -> Result<Envelope<Value>, GatewayError> {
        let req = ApiRequest::post("/campaigns").json(campaign)?;
        self.gateway.send(req).await?.json()
    }

    /// `GET /campaigns`: every campaign visible to the signed-in user.
    pub async fn list(&self, query: &CampaignQuery) -> Result<CampaignList, GatewayError> {
        self.fetch_list("/campaigns", query).await
    }

    /// `GET /campaigns/my`: campaigns owned by the signed-in brand.
    pub async fn mine(&self, query: &CampaignQuery) -> Result<CampaignList, GatewayError> {
        self.fetch_list("/campaigns/my", query).await
    }

    /// `GET /campaigns/{id}`, shaped for the viewer's role.
    pub async fn get(&self, id: &str, for_role: Role) -> Result<Value, GatewayError> {
        let role = match for_role {
            Role::Brand => "brand",
            Role::Influencer => "influencer",
        };
        let req = ApiRequest::get(campaign_path(id)?).query("for_role", role);
        let envelope: Envelope<CampaignData> = self.gateway.send(req).await?.json()?;
        Ok(envelope.into_data()?.campaign)
    }

    /// `GET /campaigns/{id}/applications`.
    pub async fn applications(&self, id: &str) -> Result<ApplicationList, GatewayError> {
        let req = ApiRequest::get(format!("{}/applications", campaign_path(id)?));
        let envelope: Envelope<ApplicationList> = self.gateway.send(req).await?.json()?;
        envelope.into_data()
    }

    /// `PUT /campaigns/{id}`.
    pub async fn update(&self, id: &str, campaign: &Value) -> Result<Envelope<Value>, GatewayError> {
        let req = ApiRequest::put(campaign_path(id)?).json(campaign)?;
        self.gateway.send(req).await?.json()
    }

    /// `DELETE /campaigns/{id}`.
    pub async fn delete(&self, id: &str) -> Result<Envelope<Value>, GatewayError> {
        let req = ApiRequest::delete(campaign_path(id)?);
        self.gateway.send(req).await?.json()
    }

    async fn fetch_list(
        &self,
        path: &str,
        query: &CampaignQuery,
    ) -> Result<CampaignList, GatewayError> {
        let req = ApiRequest::get(path).query_pairs(query.query_pairs());
        let envelope: Envelope<CampaignList> = self.gateway.send(req).await?.json()?;
        envelope.into_data()
    }
}

/// Influencer applications to campaigns.
pub struct ApplicationService {
    gateway: Arc<Gateway>,
}

impl ApplicationService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /applications`. Returns the backend's confirmation message.
    pub async fn apply(&self, campaign_id: &str) -> Result<String, GatewayError> {
        if campaign_id.is_empty() {
            return Err(GatewayError::InvalidRequest("campaign id must not be empty".to_owned()));
        }
        let req = ApiRequest::post("/applications")
            .json(&ApplyParams { campaign_id: campaign_id.to_owned() })?;
        let envelope: Envelope<Value> = self.gateway.send(req).await?.json()?;
        tracing::info!(campaign_id, "applied to campaign");
        Ok(envelope.message)
    }
}

fn campaign_path(id: &str) -> Result<String, GatewayError> {
    if id.is_empty() || id.contains('/') {
        return Err(GatewayError::InvalidRequest(format!("invalid campaign id: {id:?}")));
    }
    Ok(format!("/campaigns/{id}"))
}
