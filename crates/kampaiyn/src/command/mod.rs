// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI subcommand handlers. Results go to stdout as JSON.

pub mod campaign;
pub mod task;

use reqwest::Method;

use crate::config::{Command, ProfileArgs};
use crate::error::GatewayError;
use crate::gateway::ApiRequest;
use crate::model::auth::{GoogleParams, LoginParams, RegisterParams};
use crate::model::recommendation::RecommendationParams;
use crate::model::user::CompleteProfileParams;
use crate::service::recommendation::failure_message;
use crate::state::ClientState;

pub async fn execute(state: &ClientState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password, id_token } => {
            let user = state.auth.login(&LoginParams { email, password, id_token }).await?;
            print_json(&user)
        }
        Command::Register { name, email, password } => {
            let message = state.auth.register(&RegisterParams { name, email, password }).await?;
            println!("{message}");
            Ok(())
        }
        Command::Google { id_token } => {
            let user = state.auth.google(&GoogleParams { id_token }).await?;
            print_json(&user)
        }
        Command::Logout => {
            state.auth.logout();
            Ok(())
        }
        Command::Whoami => match state.session.user() {
            Some(user) => print_json(&user),
            None => anyhow::bail!("not logged in"),
        },
        Command::CompleteProfile(args) => {
            let user = state.users.complete_profile(&profile_params(args)).await?;
            print_json(&user)
        }
        Command::Campaign(args) => campaign::run(state, args.command).await,
        Command::Task(args) => task::run(state, args.command).await,
        Command::Recommend { tier, category, top_n } => {
            let params = RecommendationParams {
                tier,
                business_information: category,
                top_n,
                sort_by: RecommendationParams::SORT_BY_ENGAGEMENT.to_owned(),
            };
            match state.recommendations.get(&params).await {
                Ok(resp) => print_json(&resp),
                Err(e) => {
                    tracing::debug!("recommendation failed: {e}");
                    Err(anyhow::anyhow!(failure_message(&e)))
                }
            }
        }
        Command::Request { method, path, data, query } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let mut req = ApiRequest::new(method, path).query_pairs(query);
            if let Some(data) = data {
                req = req.json(&parse_body(&data)?)?;
            }
            let resp = state.gateway.send(req).await?;
            match resp.json::<serde_json::Value>() {
                Ok(value) => print_json(&value),
                Err(_) => {
                    println!("{}", resp.text());
                    Ok(())
                }
            }
        }
    }
}

fn profile_params(args: ProfileArgs) -> CompleteProfileParams {
    let mut params = CompleteProfileParams::new(args.role, args.category);
    params.photo_url = args.photo_url;
    params.company = args.company;
    params.phone_number = args.phone_number;
    params.instagram_username = args.instagram_username;
    params.instagram_followers = args.instagram_followers;
    params.instagram_avg_likes = args.instagram_avg_likes;
    params.instagram_avg_comments = args.instagram_avg_comments;
    params.instagram_engagement_rate = args.instagram_engagement_rate;
    params.portfolio_url = args.portfolio_url;
    params.follower_tier = args.follower_tier;
    params
}

/// A `--data` argument as a JSON value.
fn parse_body(data: &str) -> anyhow::Result<serde_json::Value> {
    serde_json::from_str(data).map_err(|e| anyhow::anyhow!("--data is not valid JSON: {e}"))
}

/// Turn a service error into the message shown to the user.
fn failure(err: GatewayError, fallback: &str) -> anyhow::Error {
    tracing::debug!("{fallback}: {err}");
    anyhow::anyhow!(err.message_or(fallback))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
