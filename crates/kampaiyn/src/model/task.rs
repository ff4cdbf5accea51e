// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::str::FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => anyhow::bail!("invalid task status: {other}"),
        }
    }
}

/// Body of `POST /tasks/submit`. Submitting again for the same campaign
/// replaces the earlier submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTaskParams {
    pub campaign_id: String,
    pub submission_url: String,
}

/// Body of `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusParams {
    pub status: TaskStatus,
}
