//! Database migration CLI commands.

use clap::{Args, Subcommand};

use mediastore_core::error::AppError;
use mediastore_database::connection::DatabasePool;
use mediastore_database::migration::run_migrations;

use crate::output;

/// Arguments for migration commands
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations
    Run,
    /// Check database connectivity
    Ping,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let db = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            run_migrations(db.pool()).await?;
            output::print_success("Migrations applied");
        }
        MigrateCommand::Ping => {
            db.health_check().await?;
            output::print_success("Database reachable");
        }
    }
    db.close().await;
    Ok(())
}
