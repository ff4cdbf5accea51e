// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kampaiyn task`: campaign deliverables.

use crate::model::task::{SubmitTaskParams, TaskStatus};
use crate::service::task::TASK_FAILED;
use crate::state::ClientState;

use super::{failure, print_json};

/// CLI arguments for `kampaiyn task`.
#[derive(Debug, clap::Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum TaskCommand {
    /// Submit (or resubmit) the deliverable for a campaign.
    Submit {
        #[arg(long)]
        campaign_id: String,
        /// Link to the published content.
        #[arg(long)]
        url: String,
    },
    /// Approve or reject a submitted task.
    Review {
        id: String,
        /// pending, approved or rejected.
        status: TaskStatus,
    },
}

/// Run the `kampaiyn task` subcommand.
pub async fn run(state: &ClientState, command: TaskCommand) -> anyhow::Result<()> {
    let result = match command {
        TaskCommand::Submit { campaign_id, url } => {
            let params = SubmitTaskParams { campaign_id, submission_url: url };
            state.tasks.submit(&params).await
        }
        TaskCommand::Review { id, status } => state.tasks.set_status(&id, status).await,
    };
    print_json(&result.map_err(|e| failure(e, TASK_FAILED))?)
}
