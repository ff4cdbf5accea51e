// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

/// Query for `GET /recommend` on the ML backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationParams {
    /// "Nano", "Mikro" or "Makro".
    pub tier: String,
    /// Business category, e.g. "Food" or "Fashion".
    pub business_information: String,
    pub top_n: u32,
    pub sort_by: String,
}

impl RecommendationParams {
    pub const SORT_BY_ENGAGEMENT: &'static str = "Engagement Rate";

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("tier".to_owned(), self.tier.clone()),
            ("business_information".to_owned(), self.business_information.clone()),
            ("top_n".to_owned(), self.top_n.to_string()),
            ("sort_by".to_owned(), self.sort_by.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influencer {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Engagement Rate")]
    pub engagement_rate: f64,
    #[serde(rename = "Followers")]
    pub followers: u64,
    #[serde(rename = "Tier")]
    pub tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub category: String,
    pub count: u32,
    pub recommendations: Vec<Influencer>,
    pub tier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub business_information: String,
    pub count: u32,
    pub recommendations: Recommendations,
    pub sort_by: String,
    pub tier: String,
}
