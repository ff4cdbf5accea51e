// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kampaiyn campaign`: browse, manage and apply to campaigns.

use crate::model::campaign::{CampaignQuery, CampaignStatus, SortOrder};
use crate::model::user::Role;
use crate::service::campaign::{
    APPLY_FAILED, CREATE_FAILED, DELETE_FAILED, FETCH_FAILED, UPDATE_FAILED,
};
use crate::state::ClientState;

use super::{failure, parse_body, print_json};

/// CLI arguments for `kampaiyn campaign`.
#[derive(Debug, clap::Args)]
pub struct CampaignArgs {
    #[command(subcommand)]
    pub command: CampaignCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum CampaignCommand {
    /// List campaigns.
    List(ListArgs),
    /// Show one campaign.
    Show {
        id: String,
        /// View the campaign as a brand or an influencer.
        #[arg(long = "as", default_value = "influencer")]
        role: Role,
    },
    /// List applications to a campaign.
    Applications { id: String },
    /// Create a campaign from a JSON document.
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace a campaign's fields from a JSON document.
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete { id: String },
    /// Apply to a campaign as an influencer.
    Apply { id: String },
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Only campaigns owned by the signed-in brand.
    #[arg(long)]
    pub mine: bool,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub sort_by: Option<String>,
    /// ASC or DESC.
    #[arg(long)]
    pub sort_order: Option<SortOrder>,
    #[arg(long)]
    pub status: Option<CampaignStatus>,
}

impl ListArgs {
    pub fn query(&self) -> CampaignQuery {
        CampaignQuery {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order,
            status: self.status,
        }
    }
}

/// Run the `kampaiyn campaign` subcommand.
pub async fn run(state: &ClientState, command: CampaignCommand) -> anyhow::Result<()> {
    let campaigns = &state.campaigns;
    match command {
        CampaignCommand::List(args) => {
            let query = args.query();
            let result = if args.mine {
                campaigns.mine(&query).await
            } else {
                campaigns.list(&query).await
            };
            print_json(&result.map_err(|e| failure(e, FETCH_FAILED))?)
        }
        CampaignCommand::Show { id, role } => {
            let campaign = campaigns.get(&id, role).await.map_err(|e| failure(e, FETCH_FAILED))?;
            print_json(&campaign)
        }
        CampaignCommand::Applications { id } => {
            let list = campaigns.applications(&id).await.map_err(|e| failure(e, FETCH_FAILED))?;
            print_json(&list)
        }
        CampaignCommand::Create { data } => {
            let body = parse_body(&data)?;
            let created = campaigns.create(&body).await.map_err(|e| failure(e, CREATE_FAILED))?;
            print_json(&created)
        }
        CampaignCommand::Update { id, data } => {
            let body = parse_body(&data)?;
            let updated =
                campaigns.update(&id, &body).await.map_err(|e| failure(e, UPDATE_FAILED))?;
            print_json(&updated)
        }
        CampaignCommand::Delete { id } => {
            let deleted = campaigns.delete(&id).await.map_err(|e| failure(e, DELETE_FAILED))?;
            print_json(&deleted)
        }
        CampaignCommand::Apply { id } => {
            let message =
                state.applications.apply(&id).await.map_err(|e| failure(e, APPLY_FAILED))?;
            println!("{message}");
            Ok(())
        }
    }
}
