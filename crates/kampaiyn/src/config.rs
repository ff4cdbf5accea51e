// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::command::campaign::CampaignArgs;
use crate::command::task::TaskArgs;
use crate::model::user::{FollowerTier, Role};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_ML_BASE_URL: &str = "http://localhost:5000";

/// Command-line client for the Kampaiyn influencer-marketing backend.
#[derive(Debug, Parser)]
#[command(name = "kampaiyn", version, about)]
pub struct Config {
    /// Base URL of the REST backend.
    #[arg(long, default_value = DEFAULT_API_BASE_URL, env = "KAMPAIYN_API_BASE_URL")]
    pub api_base_url: String,

    /// Base URL of the ML recommendation backend.
    #[arg(long, default_value = DEFAULT_ML_BASE_URL, env = "KAMPAIYN_ML_BASE_URL")]
    pub ml_base_url: String,

    /// Directory holding the persisted session.
    #[arg(long, env = "KAMPAIYN_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Log filter (tracing-subscriber EnvFilter syntax).
    #[arg(long, default_value = "warn", env = "KAMPAIYN_LOG")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[arg(long, default_value = "text", env = "KAMPAIYN_LOG_FORMAT")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "KAMPAIYN_PASSWORD")]
        password: String,
        /// Firebase ID token forwarded to the backend, if any.
        #[arg(long, default_value = "")]
        id_token: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "KAMPAIYN_PASSWORD")]
        password: String,
    },
    /// Sign in with a Google ID token.
    Google {
        #[arg(long)]
        id_token: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Print the signed-in user.
    Whoami,
    /// Choose brand or influencer and complete the profile.
    CompleteProfile(ProfileArgs),
    /// Browse, manage and apply to campaigns.
    Campaign(CampaignArgs),
    /// Submit and review campaign deliverables.
    Task(TaskArgs),
    /// Ask the ML backend for matching influencers.
    Recommend {
        /// Nano, Mikro or Makro.
        #[arg(long)]
        tier: String,
        /// Business category (Food, Fashion, Beauty, Lifestyle, Other).
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 10)]
        top_n: u32,
    },
    /// Send an arbitrary authenticated request to the REST backend.
    Request {
        /// HTTP method, e.g. GET or POST.
        method: String,
        /// Path relative to the API base URL, e.g. /campaigns.
        path: String,
        /// JSON request body.
        #[arg(long)]
        data: Option<String>,
        /// Query parameter as key=value; repeatable.
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
}

#[derive(Debug, clap::Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub role: Role,
    /// Business category (brands) or content category (influencers).
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub phone_number: Option<String>,
    #[arg(long)]
    pub photo_url: Option<String>,
    #[arg(long)]
    pub portfolio_url: Option<String>,
    #[arg(long)]
    pub instagram_username: Option<String>,
    #[arg(long)]
    pub instagram_followers: Option<String>,
    #[arg(long)]
    pub instagram_avg_likes: Option<String>,
    #[arg(long)]
    pub instagram_avg_comments: Option<String>,
    #[arg(long)]
    pub instagram_engagement_rate: Option<String>,
    /// nano, micro, macro or mega.
    #[arg(long)]
    pub follower_tier: Option<FollowerTier>,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_owned(), v.to_owned())),
        _ => Err(format!("expected key=value, got {s:?}")),
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [("api-base-url", &self.api_base_url), ("ml-base-url", &self.ml_base_url)]
        {
            if url.trim().is_empty() {
                anyhow::bail!("--{name} must not be empty");
            }
            if let Err(e) = reqwest::Url::parse(url) {
                anyhow::bail!("--{name} is not a valid URL ({url}): {e}");
            }
        }
        match self.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => anyhow::bail!("invalid log format: {other}"),
        }
    }

    /// The state directory: `--state-dir`, else the environment default.
    pub fn resolve_state_dir(&self) -> PathBuf {
        match self.state_dir {
            Some(ref dir) => dir.clone(),
            None => state_dir_with(|name| std::env::var(name).ok()),
        }
    }
}

/// Resolve the state directory from an environment lookup.
///
/// Checks `KAMPAIYN_STATE_DIR`, then `$XDG_STATE_HOME/kampaiyn`,
/// then `$HOME/.local/state/kampaiyn`.
pub fn state_dir_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = env("KAMPAIYN_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = env("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("kampaiyn");
    }
    if let Some(home) = env("HOME") {
        return PathBuf::from(home).join(".local/state/kampaiyn");
    }
    PathBuf::from(".kampaiyn")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
