// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated request gateway.
//!
//! Every primary-backend call goes through [`Gateway::send`]. The gateway
//! stamps the session's access token on the request and, when the backend
//! answers 401, runs at most one refresh at a time: the first failing request
//! refreshes, every request failing meanwhile parks in a queue, and once the
//! refresh succeeds the parked requests are reissued in the order they
//! queued, the refreshing request last. A failed refresh rejects them all.
//!
//! The check-and-set of the in-flight flag happens under one mutex before any
//! await point. The mutex is never held across an await.

pub mod endpoint;
pub mod request;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use reqwest::StatusCode;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::session::{SessionStore, TokenPair};

pub use endpoint::{Endpoint, REQUEST_TIMEOUT};
pub use request::{ApiRequest, ApiResponse};

const REFRESH_FAILED: &str = "failed to refresh token";
const REFRESH_ABANDONED: &str = "session refresh abandoned";

/// Exchanges a refresh token for a new credential pair.
///
/// Called by at most one task per gateway at a time.
pub trait Refresher: Send + Sync {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, anyhow::Result<TokenPair>>;
}

/// Session lifecycle notifications emitted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    /// A refresh succeeded and the session holds a new pair.
    Refreshed,
    /// The session could not be refreshed; the front end should send the
    /// user back to its login entry point.
    LoginRequired,
}

/// What a parked request receives when the refresh settles: the response to
/// its reissue, or the shared failure.
type Outcome = Result<ApiResponse, GatewayError>;

/// A 401'd request parked while another task refreshes.
struct PendingRequest {
    request: ApiRequest,
    done: oneshot::Sender<Outcome>,
}

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    pending: Vec<PendingRequest>,
}

enum Admission {
    /// Retry right away with this (already stamped) request.
    Retry(ApiRequest),
    /// Another task is refreshing; wait for its outcome.
    Queued(oneshot::Receiver<Outcome>),
    /// This task owns the refresh.
    Refresh(ApiRequest),
    /// Nothing to refresh with; the 401 stands.
    NoCredentials,
}

pub struct Gateway {
    endpoint: Endpoint,
    session: Arc<SessionStore>,
    refresher: Arc<dyn Refresher>,
    event_tx: broadcast::Sender<GatewayEvent>,
    refresh: Mutex<RefreshState>,
}

impl Gateway {
    pub fn new(
        endpoint: Endpoint,
        session: Arc<SessionStore>,
        refresher: Arc<dyn Refresher>,
        event_tx: broadcast::Sender<GatewayEvent>,
    ) -> Arc<Self> {
        Arc::new(Self {
            endpoint,
            session,
            refresher,
            event_tx,
            refresh: Mutex::new(RefreshState::default()),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.event_tx.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.lock().in_flight
    }

    /// Number of requests parked behind the in-flight refresh.
    pub fn pending_count(&self) -> usize {
        self.refresh.lock().pending.len()
    }

    /// Issue `request`, recovering once from an expired access token.
    pub async fn send(&self, mut request: ApiRequest) -> Outcome {
        if let Some(token) = self.session.active_access_token() {
            request.stamp(token);
        }

        let response = self.endpoint.dispatch(&request).await?;
        if response.status() != StatusCode::UNAUTHORIZED || request.is_retried() {
            return response.into_result();
        }

        request.mark_retried();
        match self.admit(request) {
            Admission::Retry(request) => self.endpoint.dispatch(&request).await?.into_result(),
            Admission::Queued(rx) => match rx.await {
                Ok(outcome) => outcome,
                Err(_) => Err(GatewayError::auth_failed(REFRESH_ABANDONED)),
            },
            Admission::Refresh(request) => self.run_refresh(request).await,
            Admission::NoCredentials => response.into_result(),
        }
    }

    fn admit(&self, mut request: ApiRequest) -> Admission {
        let mut state = self.refresh.lock();
        if state.in_flight {
            let (done, rx) = oneshot::channel();
            debug!(request_id = %request.id(), queued = state.pending.len() + 1, "queued behind refresh");
            state.pending.push(PendingRequest { request, done });
            return Admission::Queued(rx);
        }

        // A refresh finished after this request went out with the old token.
        if let Some(current) = self.session.active_access_token() {
            if request.bearer() != Some(current.as_str()) {
                debug!(request_id = %request.id(), "retrying with newer token");
                request.stamp(current);
                return Admission::Retry(request);
            }
        }

        // Signed out, or a failed refresh already cleared the session.
        if self.session.refresh_token().is_empty() {
            debug!(request_id = %request.id(), "no refresh token, passing 401 through");
            return Admission::NoCredentials;
        }

        state.in_flight = true;
        Admission::Refresh(request)
    }

    async fn run_refresh(&self, request: ApiRequest) -> Outcome {
        let mut guard = RefreshGuard { gateway: self, settled: false };
        let refresh_token = self.session.refresh_token();
        info!(request_id = %request.id(), "access token rejected, refreshing session");

        match self.refresher.refresh(&refresh_token).await {
            Ok(pair) => {
                self.session.set_credentials(&pair);
                let mut queue = guard.settle();
                info!(released = queue.len(), "session refreshed");
                let _ = self.event_tx.send(GatewayEvent::Refreshed);

                // The refreshing request goes last, after everything it held up.
                let (done, rx) = oneshot::channel();
                queue.push(PendingRequest { request, done });
                tokio::spawn(replay(self.endpoint.clone(), pair.access_token, queue));
                match rx.await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(GatewayError::auth_failed(REFRESH_ABANDONED)),
                }
            }
            Err(e) => {
                warn!("session refresh failed: {e:#}");
                self.session.clear();
                let queue = guard.settle();
                for parked in queue {
                    let _ = parked.done.send(Err(GatewayError::auth_failed(REFRESH_FAILED)));
                }
                let _ = self.event_tx.send(GatewayEvent::LoginRequired);
                Err(GatewayError::auth_failed(REFRESH_FAILED))
            }
        }
    }
}

/// Reissue released requests with the new token, one at a time in queue
/// order, handing each response to its caller. Runs detached so a caller
/// going away mid-replay does not strand the rest of the queue.
async fn replay(endpoint: Endpoint, access_token: String, queue: Vec<PendingRequest>) {
    for PendingRequest { mut request, done } in queue {
        if done.is_closed() {
            debug!(request_id = %request.id(), "caller gone, skipping reissue");
            continue;
        }
        request.stamp(access_token.clone());
        let outcome = match endpoint.dispatch(&request).await {
            Ok(response) => response.into_result(),
            Err(e) => Err(e),
        };
        let _ = done.send(outcome);
    }
}

/// Clears the in-flight flag if the refreshing task is dropped mid-refresh.
/// Parked requests then see their sender dropped and fail.
struct RefreshGuard<'a> {
    gateway: &'a Gateway,
    settled: bool,
}

impl RefreshGuard<'_> {
    /// Close the refresh window and take the parked requests, atomically.
    fn settle(&mut self) -> Vec<PendingRequest> {
        self.settled = true;
        let mut state = self.gateway.refresh.lock();
        state.in_flight = false;
        std::mem::take(&mut state.pending)
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let abandoned = self.settle();
        warn!(abandoned = abandoned.len(), "{REFRESH_ABANDONED}");
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
