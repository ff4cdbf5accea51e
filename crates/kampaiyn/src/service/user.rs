// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::model::user::{CompleteProfileParams, User, UserData};
use crate::model::Envelope;

pub struct UserService {
    gateway: Arc<Gateway>,
}

impl UserService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /users/complete-profile`: pick brand or influencer and fill in
    /// the matching profile.
    pub async fn complete_profile(
        &self,
        params: &CompleteProfileParams,
    ) -> Result<User, GatewayError> {
        let req = ApiRequest::post("/users/complete-profile").json(params)?;
        let envelope: Envelope<UserData> = self.gateway.send(req).await?.json()?;
        Ok(envelope.into_data()?.user)
    }
}
