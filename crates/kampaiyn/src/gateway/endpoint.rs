// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for one Kampaiyn backend.

use std::sync::Once;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Url};

use crate::error::GatewayError;
use crate::gateway::request::{ApiRequest, ApiResponse};

/// Timeout applied to every call on every endpoint.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const REQUEST_ID_HEADER: &str = "x-request-id";

fn ensure_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Base URL plus a client with the fixed timeout.
///
/// Dispatches requests verbatim: no credential refresh, no status
/// classification. The gateway layers those on top.
#[derive(Debug, Clone)]
pub struct Endpoint {
    name: &'static str,
    base_url: String,
    client: Client,
}

impl Endpoint {
    pub fn new(name: &'static str, base_url: impl Into<String>) -> Result<Self, GatewayError> {
        ensure_crypto_provider();
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(GatewayError::InvalidRequest(format!("{name}: empty base URL")));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { name, base_url, client })
    }

    /// The REST backend.
    pub fn primary(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::new("primary", base_url)
    }

    /// The ML recommendation backend.
    pub fn recommendation(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::new("recommendation", base_url)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, request: &ApiRequest) -> Result<Url, GatewayError> {
        let path = request.path();
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&joined)
            .map_err(|e| GatewayError::InvalidRequest(format!("{joined}: {e}")))?;
        if !request.query_params().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_params());
        }
        Ok(url)
    }

    /// Issue the request once and read the whole response.
    pub async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, GatewayError> {
        let url = self.url(request)?;
        let mut builder =
            self.client.request(request.method().clone(), url).headers(request.headers().clone());
        if let Ok(id) = HeaderValue::from_str(&request.id().to_string()) {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        if let Some(token) = request.bearer() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body_bytes() {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        tracing::debug!(
            endpoint = self.name,
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            status = status.as_u16(),
            retried = request.is_retried(),
            "dispatched"
        );
        Ok(ApiResponse::new(status, headers, body))
    }
}
