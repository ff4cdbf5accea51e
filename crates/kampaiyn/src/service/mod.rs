// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed wrappers over the Kampaiyn backends.

pub mod auth;
pub mod campaign;
pub mod recommendation;
pub mod task;
pub mod user;

pub use auth::{AuthService, TokenRefresher};
pub use campaign::{ApplicationService, CampaignService};
pub use recommendation::RecommendationService;
pub use task::TaskService;
pub use user::UserService;
