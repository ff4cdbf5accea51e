// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Influencer,
    Brand,
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "influencer" => Ok(Self::Influencer),
            "brand" => Ok(Self::Brand),
            other => anyhow::bail!("invalid role: {other}"),
        }
    }
}

/// Signed-in account. Only `id`, `name` and `email` are guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified_at: Option<String>,
}

/// Accept numeric or string ids.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowerTier {
    Nano,
    Micro,
    Macro,
    Mega,
}

impl std::str::FromStr for FollowerTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nano" => Ok(Self::Nano),
            "micro" => Ok(Self::Micro),
            "macro" => Ok(Self::Macro),
            "mega" => Ok(Self::Mega),
            other => anyhow::bail!("invalid follower tier: {other}"),
        }
    }
}

/// Body of `POST /users/complete-profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteProfileParams {
    pub role: Role,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_followers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_avg_likes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_avg_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_engagement_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_tier: Option<FollowerTier>,
}

impl CompleteProfileParams {
    /// Only the required fields set.
    pub fn new(role: Role, category: impl Into<String>) -> Self {
        Self {
            role,
            category: category.into(),
            photo_url: None,
            company: None,
            phone_number: None,
            instagram_username: None,
            instagram_followers: None,
            instagram_avg_likes: None,
            instagram_avg_comments: None,
            instagram_engagement_rate: None,
            portfolio_url: None,
            follower_tier: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user: User,
}
