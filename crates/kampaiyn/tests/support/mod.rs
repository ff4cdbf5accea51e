// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock Kampaiyn backends and gateway fixtures shared by integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Semaphore};

use kampaiyn::gateway::{Endpoint, Gateway, GatewayEvent, Refresher};
use kampaiyn::model::user::User;
use kampaiyn::session::{SessionData, SessionStore, TokenPair};

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub authorization: Option<String>,
}

/// REST backend double. Accepts exactly one access token at a time.
pub struct Backend {
    valid_token: Mutex<String>,
    hits: Mutex<Vec<Hit>>,
    bodies: Mutex<Vec<(String, Value)>>,
    /// Requests to `/held/{name}` wait here until released.
    hold: Semaphore,
    pub refresh_calls: AtomicU32,
}

impl Backend {
    pub fn accepting(token: &str) -> Arc<Self> {
        Arc::new(Self {
            valid_token: Mutex::new(token.to_owned()),
            hits: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
            hold: Semaphore::new(0),
            refresh_calls: AtomicU32::new(0),
        })
    }

    /// Let every held request (and any later one) through.
    pub fn release_held(&self) {
        self.hold.add_permits(1024);
    }

    /// Last JSON body received on `path`.
    pub fn body_for(&self, path: &str) -> Option<Value> {
        self.bodies.lock().iter().rev().find(|(p, _)| p == path).map(|(_, b)| b.clone())
    }

    /// Paths of the requests that carried `Bearer <token>`, in arrival order.
    pub fn paths_with(&self, token: &str) -> Vec<String> {
        let expected = format!("Bearer {token}");
        self.hits
            .lock()
            .iter()
            .filter(|h| h.authorization.as_deref() == Some(expected.as_str()))
            .map(|h| h.path.clone())
            .collect()
    }

    /// Start accepting `token` only.
    pub fn rotate(&self, token: &str) {
        *self.valid_token.lock() = token.to_owned();
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    /// Authorization headers seen for `path`, in arrival order.
    pub fn auth_for(&self, path: &str) -> Vec<Option<String>> {
        self.hits.lock().iter().filter(|h| h.path == path).map(|h| h.authorization.clone()).collect()
    }

    fn record(&self, path: String, headers: &HeaderMap) -> Option<String> {
        let authorization =
            headers.get("authorization").and_then(|v| v.to_str().ok()).map(str::to_owned);
        self.hits.lock().push(Hit { path, authorization: authorization.clone() });
        authorization
    }

    fn authorized(&self, authorization: Option<&str>) -> bool {
        let expected = format!("Bearer {}", self.valid_token.lock());
        authorization == Some(expected.as_str())
    }

    /// Record the hit; a rejection response if its token is not the valid one.
    fn deny(&self, path: &str, headers: &HeaderMap) -> Option<Response> {
        let auth = self.record(path.to_owned(), headers);
        (!self.authorized(auth.as_deref())).then(unauthorized)
    }

    fn keep_body(&self, path: &str, body: &Value) {
        self.bodies.lock().push((path.to_owned(), body.clone()));
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "statusCode": 401, "message": "Unauthorized" })))
        .into_response()
}

async fn item(
    State(backend): State<Arc<Backend>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let auth = backend.record(format!("/items/{name}"), &headers);
    if !backend.authorized(auth.as_deref()) {
        return unauthorized();
    }
    Json(json!({ "item": name })).into_response()
}

async fn held(
    State(backend): State<Arc<Backend>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    let auth = backend.record(format!("/held/{name}"), &headers);
    let _permit = backend.hold.acquire().await;
    if !backend.authorized(auth.as_deref()) {
        return unauthorized();
    }
    Json(json!({ "item": name })).into_response()
}

async fn always_unauthorized(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    backend.record("/always-401".to_owned(), &headers);
    unauthorized()
}

async fn broken(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    backend.record("/broken".to_owned(), &headers);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" }))).into_response()
}

async fn refresh(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if body["refreshToken"] != "r1" {
        return unauthorized();
    }
    backend.rotate("t2");
    Json(json!({
        "message": "Token refreshed",
        "data": { "accessToken": "t2", "refreshToken": "r2" }
    }))
    .into_response()
}

async fn login(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 401, "message": "Invalid credentials" })),
        )
            .into_response();
    }
    backend.rotate("t1");
    Json(json!({
        "statusCode": 200,
        "message": "Login successful",
        "data": {
            "user": { "id": 7, "name": "Rina", "email": body["email"] },
            "accessToken": "t1",
            "refreshToken": "r1"
        }
    }))
    .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({
            "statusCode": 201,
            "message": "Registration successful, check your email",
            "data": { "user": { "id": "u-9", "name": body["name"], "email": body["email"] } }
        })),
    )
        .into_response()
}

async fn complete_profile(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = backend.deny("/users/complete-profile", &headers) {
        return denied;
    }
    backend.keep_body("/users/complete-profile", &body);
    Json(json!({
        "message": "Profile completed",
        "data": { "user": { "id": "u-1", "name": "Rina", "email": "rina@example.com", "role": body["role"] } }
    }))
    .into_response()
}

fn pagination(page: u32) -> Value {
    json!({
        "current_page": page,
        "total_pages": 3,
        "total_items": 21,
        "items_per_page": 10,
        "has_next": page < 3,
        "has_prev": page > 1
    })
}

async fn list_campaigns(
    State(backend): State<Arc<Backend>>,
    Query(q): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = backend.deny("/campaigns", &headers) {
        return denied;
    }
    let page = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "status": "success",
        "message": "Campaigns retrieved",
        "data": {
            "campaigns": [{ "id": "c-1", "status": q.get("status") }],
            "pagination": pagination(page),
            "filters": { "sort_by": q.get("sort_by"), "sort_order": q.get("sort_order") }
        }
    }))
    .into_response()
}

async fn my_campaigns(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    if let Some(denied) = backend.deny("/campaigns/my", &headers) {
        return denied;
    }
    Json(json!({
        "status": "success",
        "message": "Campaigns retrieved",
        "data": { "campaigns": [{ "id": "c-mine" }], "pagination": pagination(1) }
    }))
    .into_response()
}

async fn create_campaign(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = backend.deny("/campaigns", &headers) {
        return denied;
    }
    backend.keep_body("/campaigns", &body);
    if body.get("campaign_name").is_none() {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Campaign created",
            "data": { "campaigns": [body] }
        })),
    )
        .into_response()
}

async fn show_campaign(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = backend.deny(&format!("/campaigns/{id}"), &headers) {
        return denied;
    }
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Campaign tidak ditemukan" })))
            .into_response();
    }
    Json(json!({
        "status": "success",
        "message": "Campaign retrieved",
        "data": { "campaign": { "id": id, "viewer": q.get("for_role") } }
    }))
    .into_response()
}

async fn update_campaign(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/campaigns/{id}");
    if let Some(denied) = backend.deny(&path, &headers) {
        return denied;
    }
    backend.keep_body(&path, &body);
    Json(json!({ "status": "success", "message": "Campaign updated", "data": { "campaigns": [] } }))
        .into_response()
}

async fn delete_campaign(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = backend.deny(&format!("/campaigns/{id}"), &headers) {
        return denied;
    }
    Json(json!({ "status": "success", "message": "Campaign deleted" })).into_response()
}

async fn campaign_applications(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(denied) = backend.deny(&format!("/campaigns/{id}/applications"), &headers) {
        return denied;
    }
    Json(json!({
        "status": "success",
        "message": "Applications retrieved",
        "data": {
            "application": [{ "id": "a-1", "campaign_id": id, "status": "applied" }],
            "pagination": pagination(1)
        }
    }))
    .into_response()
}

async fn apply(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = backend.deny("/applications", &headers) {
        return denied;
    }
    backend.keep_body("/applications", &body);
    if body["campaign_id"] == "c-closed" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Campaign sudah ditutup" })))
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "message": "Application submitted" }))).into_response()
}

async fn submit_task(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = backend.deny("/tasks/submit", &headers) {
        return denied;
    }
    backend.keep_body("/tasks/submit", &body);
    Json(json!({
        "message": "Task submitted",
        "data": { "task": { "id": "t-3", "status": "pending", "submission_url": body["submission_url"] } }
    }))
    .into_response()
}

async fn review_task(
    State(backend): State<Arc<Backend>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/tasks/{id}");
    if let Some(denied) = backend.deny(&path, &headers) {
        return denied;
    }
    backend.keep_body(&path, &body);
    Json(json!({
        "message": "Task updated",
        "data": { "task": { "id": id, "status": body["status"] } }
    }))
    .into_response()
}

pub fn backend_router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/items/{name}", get(item))
        .route("/held/{name}", get(held))
        .route("/campaigns", get(list_campaigns).post(create_campaign))
        .route("/campaigns/my", get(my_campaigns))
        .route("/campaigns/{id}", get(show_campaign).put(update_campaign).delete(delete_campaign))
        .route("/campaigns/{id}/applications", get(campaign_applications))
        .route("/applications", post(apply))
        .route("/tasks/submit", post(submit_task))
        .route("/tasks/{id}", patch(review_task))
        .route("/always-401", get(always_unauthorized))
        .route("/broken", get(broken))
        .route("/auth/refresh", post(refresh))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/users/complete-profile", post(complete_profile))
        .with_state(backend)
}

async fn recommend(Query(q): Query<HashMap<String, String>>) -> Response {
    let tier = q.get("tier").cloned().unwrap_or_default();
    match tier.as_str() {
        "Giga" => (StatusCode::BAD_REQUEST, Json(json!({ "message": "tier tidak valid" })))
            .into_response(),
        "Down" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!({
            "business_information": q.get("business_information"),
            "count": 1,
            "sort_by": q.get("sort_by"),
            "tier": tier,
            "recommendations": {
                "category": q.get("business_information"),
                "count": 1,
                "tier": tier,
                "recommendations": [{
                    "Username": "kuliner.jkt",
                    "Category": "Food",
                    "Engagement Rate": 4.2,
                    "Followers": 15300,
                    "Tier": tier
                }]
            }
        }))
        .into_response(),
    }
}

pub fn ml_router() -> Router {
    Router::new().route("/recommend", get(recommend))
}

/// Serve `router` on an ephemeral port. Returns the base URL.
pub async fn serve(router: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://{addr}"))
}

/// Refresher double: counts calls, can be held shut until the test opens it.
pub struct TestRefresher {
    pub calls: AtomicU32,
    pub seen_tokens: Mutex<Vec<String>>,
    gate: Semaphore,
    outcome: Option<TokenPair>,
}

impl TestRefresher {
    fn build(outcome: Option<TokenPair>, open: bool) -> Arc<Self> {
        let permits = if open { Semaphore::MAX_PERMITS } else { 0 };
        Arc::new(Self {
            calls: AtomicU32::new(0),
            seen_tokens: Mutex::new(Vec::new()),
            gate: Semaphore::new(permits),
            outcome,
        })
    }

    /// Succeeds immediately with `pair`.
    pub fn succeeding(pair: TokenPair) -> Arc<Self> {
        Self::build(Some(pair), true)
    }

    /// Succeeds with `pair` once [`TestRefresher::open`] is called.
    pub fn gated(pair: TokenPair) -> Arc<Self> {
        Self::build(Some(pair), false)
    }

    /// Fails once [`TestRefresher::open`] is called.
    pub fn gated_failure() -> Arc<Self> {
        Self::build(None, false)
    }

    pub fn open(&self) {
        self.gate.add_permits(1024);
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn run(&self, refresh_token: &str) -> anyhow::Result<TokenPair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().push(refresh_token.to_owned());
        let _permit = self.gate.acquire().await?;
        match self.outcome {
            Some(ref pair) => Ok(pair.clone()),
            None => anyhow::bail!("refresh endpoint unreachable"),
        }
    }
}

impl Refresher for TestRefresher {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, anyhow::Result<TokenPair>> {
        Box::pin(self.run(refresh_token))
    }
}

/// Session signed in as `u-1` with the given pair.
pub fn signed_in(access: &str, refresh: &str) -> Arc<SessionStore> {
    let session = SessionStore::in_memory();
    session.set_user(SessionData {
        user: User {
            id: "u-1".to_owned(),
            name: "Rina".to_owned(),
            email: "rina@example.com".to_owned(),
            ..Default::default()
        },
        access_token: access.to_owned(),
        refresh_token: refresh.to_owned(),
    });
    Arc::new(session)
}

pub fn gateway(
    base_url: &str,
    session: Arc<SessionStore>,
    refresher: Arc<TestRefresher>,
) -> anyhow::Result<(Arc<Gateway>, broadcast::Receiver<GatewayEvent>)> {
    let (event_tx, events) = broadcast::channel(16);
    let gateway = Gateway::new(Endpoint::primary(base_url)?, session, refresher, event_tx);
    Ok((gateway, events))
}

/// Poll `cond` until it holds or five seconds pass.
pub async fn wait_until(what: &str, cond: impl Fn() -> bool) -> anyhow::Result<()> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        if Instant::now() > deadline {
            anyhow::bail!("timed out waiting for {what}");
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Ok(())
}

/// Drain everything currently buffered on the event channel.
pub fn drain(events: &mut broadcast::Receiver<GatewayEvent>) -> Vec<GatewayEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}
