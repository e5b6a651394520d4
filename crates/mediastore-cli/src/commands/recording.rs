//! Recording bundle CLI commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use mediastore_core::error::AppError;

use crate::output;

/// Arguments for recording commands
#[derive(Debug, Args)]
pub struct RecordingArgs {
    /// Recording subcommand
    #[command(subcommand)]
    pub command: RecordingCommand,
}

/// Recording subcommands
#[derive(Debug, Subcommand)]
pub enum RecordingCommand {
    /// Bundle a recording's files into a downloadable archive
    Get {
        /// Tenant owning the recording
        #[arg(long)]
        customer_id: Uuid,
        /// Recording ID
        #[arg(long)]
        reference_id: Uuid,
    },
    /// Delete all files attached to a recording
    Delete {
        /// Tenant owning the recording
        #[arg(long)]
        customer_id: Uuid,
        /// Recording ID
        #[arg(long)]
        reference_id: Uuid,
    },
}

/// Execute recording commands
pub async fn execute(args: &RecordingArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let engines = super::build_engines(&config).await?;

    match &args.command {
        RecordingCommand::Get {
            customer_id,
            reference_id,
        } => {
            let bundle = engines
                .files
                .recording_get(*customer_id, *reference_id)
                .await?;
            output::print_json(&bundle);
        }
        RecordingCommand::Delete {
            customer_id,
            reference_id,
        } => {
            let deleted = engines
                .files
                .recording_delete(*customer_id, *reference_id)
                .await?;
            output::print_success(&format!("Deleted {deleted} recording files"));
        }
    }
    Ok(())
}
