//! Storage account CLI commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use mediastore_core::error::AppError;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::account::AccountFilters;

use crate::output;

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Provision a storage account for a customer
    Create {
        /// Customer ID
        #[arg(long)]
        customer_id: Uuid,
    },
    /// Show one account
    Get {
        /// Account ID
        id: Uuid,
    },
    /// List accounts, newest first
    List {
        /// Filter by tenant
        #[arg(long)]
        customer_id: Option<Uuid>,
        /// Include soft-deleted rows
        #[arg(long)]
        deleted: bool,
        /// Page token (exclusive creation-time upper bound, RFC 3339)
        #[arg(long)]
        token: Option<String>,
        /// Page size
        #[arg(long, default_value_t = 100)]
        size: u64,
    },
    /// Soft-delete an account
    Delete {
        /// Account ID
        id: Uuid,
    },
}

/// Execute account commands
pub async fn execute(args: &AccountArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let engines = super::build_engines(&config).await?;

    match &args.command {
        AccountCommand::Create { customer_id } => {
            let account = engines.accounts.create(*customer_id).await?;
            output::print_json(&account);
        }
        AccountCommand::Get { id } => {
            let account = engines.accounts.get(*id).await?;
            output::print_json(&account);
        }
        AccountCommand::List {
            customer_id,
            deleted,
            token,
            size,
        } => {
            let filters = AccountFilters {
                customer_id: *customer_id,
                deleted: *deleted,
            };
            let accounts = engines
                .accounts
                .list(&PageRequest::new(token.clone(), *size), &filters)
                .await?;
            output::print_json(&accounts);
        }
        AccountCommand::Delete { id } => {
            engines.accounts.delete(*id).await?;
            output::print_success(&format!("Account {id} deleted"));
        }
    }
    Ok(())
}
