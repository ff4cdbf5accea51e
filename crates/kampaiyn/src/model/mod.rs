// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request and response shapes for the Kampaiyn backends.

pub mod auth;
pub mod campaign;
pub mod recommendation;
pub mod task;
pub mod user;

use serde::{Deserialize, Serialize};

/// Response envelope used by the primary backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Take the payload, or fail with the envelope's own message.
    pub fn into_data(self) -> Result<T, crate::error::GatewayError> {
        match self.data {
            Some(data) => Ok(data),
            None => {
                let reason = self.error.unwrap_or(self.message);
                Err(crate::error::GatewayError::EmptyPayload(reason))
            }
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
