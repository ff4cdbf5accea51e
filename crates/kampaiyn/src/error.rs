// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use bytes::Bytes;
use reqwest::StatusCode;

/// Errors surfaced to callers of [`crate::gateway::Gateway::send`] and the
/// services built on it.
#[derive(Debug)]
pub enum GatewayError {
    /// The request never produced a response (connect, timeout, TLS, body read).
    Transport(reqwest::Error),
    /// The backend answered with a non-2xx status.
    Status { status: StatusCode, body: Bytes },
    /// The session could not be refreshed; every waiter sees this.
    AuthenticationFailed(String),
    /// A 2xx body did not match the expected shape.
    Decode(serde_json::Error),
    /// A 2xx envelope arrived without its `data` payload.
    EmptyPayload(String),
    /// The request could not be built.
    InvalidRequest(String),
}

impl GatewayError {
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed(message.into())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport(_) => "TRANSPORT",
            Self::Status { .. } => "BACKEND_STATUS",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::Decode(_) => "DECODE",
            Self::EmptyPayload(_) => "EMPTY_PAYLOAD",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    /// HTTP status of a backend rejection, if this error is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// The `message` field of a JSON error body, if the backend sent one.
    pub fn backend_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .filter(|m| !m.is_empty())
    }

    /// The backend's message, or `fallback` when it gave none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or_else(|| fallback.to_owned())
    }

    /// Best-effort human message: the backend's message, else the display form.
    pub fn message(&self) -> String {
        self.backend_message().unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}: {e}", self.as_str()),
            Self::Status { status, body } => {
                write!(f, "{}: HTTP {status}", self.as_str())?;
                if !body.is_empty() {
                    write!(f, ": {}", String::from_utf8_lossy(body))?;
                }
                Ok(())
            }
            Self::AuthenticationFailed(msg) => write!(f, "{}: {msg}", self.as_str()),
            Self::Decode(e) => write!(f, "{}: {e}", self.as_str()),
            Self::EmptyPayload(msg) => write!(f, "{}: {msg}", self.as_str()),
            Self::InvalidRequest(msg) => write!(f, "{}: {msg}", self.as_str()),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
