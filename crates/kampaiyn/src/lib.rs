// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kampaiyn API client: authenticated request gateway with single-flight
//! token refresh, session store, and typed services.

pub mod command;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod service;
pub mod session;
pub mod state;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::gateway::GatewayEvent;
use crate::state::ClientState;

/// Run one CLI command against the configured backends.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = ClientState::from_config(&config)?;
    let mut events = state.subscribe();

    let result = command::execute(&state, config.command).await;
    report_events(&mut events);
    result
}

/// Surface session notifications the gateway raised during the command.
fn report_events(events: &mut broadcast::Receiver<GatewayEvent>) {
    loop {
        match events.try_recv() {
            Ok(GatewayEvent::LoginRequired) => {
                eprintln!("session expired, run `kampaiyn login`");
            }
            Ok(GatewayEvent::Refreshed) => tracing::debug!("session refreshed"),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
}
