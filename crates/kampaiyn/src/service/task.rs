// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use serde_json::Value;

use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::model::task::{SubmitTaskParams, TaskStatus, TaskStatusParams};
use crate::model::Envelope;

pub const TASK_FAILED: &str = "failed to submit or update task";

pub struct TaskService {
    gateway: Arc<Gateway>,
}

impl TaskService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `POST /tasks/submit`: an influencer hands in (or replaces) their work.
    pub async fn submit(&self, params: &SubmitTaskParams) -> Result<Envelope<Value>, GatewayError> {
        let req = ApiRequest::post("/tasks/submit").json(params)?;
        self.gateway.send(req).await?.json()
    }

    /// `PATCH /tasks/{id}`: a brand approves or rejects a submission.
    pub async fn set_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> Result<Envelope<Value>, GatewayError> {
        if id.is_empty() || id.contains('/') {
            return Err(GatewayError::InvalidRequest(format!("invalid task id: {id:?}")));
        }
        let req = ApiRequest::patch(format!("/tasks/{id}")).json(&TaskStatusParams { status })?;
        self.gateway.send(req).await?.json()
    }
}
