//! File management CLI commands.

use clap::{Args, Subcommand};
use uuid::Uuid;

use mediastore_core::error::AppError;
use mediastore_core::types::pagination::PageRequest;
use mediastore_entity::file::{FileFilters, ReferenceType};
use mediastore_service::CreateFileRequest;

use crate::output;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// Take ownership of an uploaded object
    Create {
        /// Tenant owning the file
        #[arg(long)]
        customer_id: Uuid,
        /// Agent or resource that produced the file
        #[arg(long)]
        owner_id: Uuid,
        /// What the file is attached to (none, normal, recording)
        #[arg(long, default_value = "normal")]
        reference_type: ReferenceType,
        /// Identifier of the referenced resource
        #[arg(long)]
        reference_id: Uuid,
        /// Display name
        #[arg(long)]
        name: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        detail: String,
        /// Original filename
        #[arg(long)]
        filename: String,
        /// Bucket the object was uploaded to
        #[arg(long)]
        src_bucket: String,
        /// Path of the uploaded object
        #[arg(long)]
        src_path: String,
    },
    /// Show one file
    Get {
        /// File ID
        id: Uuid,
    },
    /// List files, newest first
    List {
        /// Filter by tenant
        #[arg(long)]
        customer_id: Option<Uuid>,
        /// Filter by reference type
        #[arg(long)]
        reference_type: Option<ReferenceType>,
        /// Filter by referenced resource
        #[arg(long)]
        reference_id: Option<Uuid>,
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
    /// Soft-delete a file
    Delete {
        /// File ID
        id: Uuid,
    },
}

/// Execute file commands
pub async fn execute(args: &FileArgs, env: &str) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let engines = super::build_engines(&config).await?;

    match &args.command {
        FileCommand::Create {
            customer_id,
            owner_id,
            reference_type,
            reference_id,
            name,
            detail,
            filename,
            src_bucket,
            src_path,
        } => {
            let file = engines
                .files
                .create(CreateFileRequest {
                    customer_id: *customer_id,
                    owner_id: *owner_id,
                    reference_type: *reference_type,
                    reference_id: *reference_id,
                    name: name.clone(),
                    detail: detail.clone(),
                    filename: filename.clone(),
                    src_bucket: src_bucket.clone(),
                    src_path: src_path.clone(),
                })
                .await?;
            output::print_json(&file);
        }
        FileCommand::Get { id } => {
            let file = engines.files.get(*id).await?;
            output::print_json(&file);
        }
        FileCommand::List {
            customer_id,
            reference_type,
            reference_id,
            deleted,
            token,
            size,
        } => {
            let filters = FileFilters {
                customer_id: *customer_id,
                reference_type: *reference_type,
                reference_id: *reference_id,
                deleted: *deleted,
            };
            let files = engines
                .files
                .list(&PageRequest::new(token.clone(), *size), &filters)
                .await?;
            output::print_json(&files);
        }
        FileCommand::Delete { id } => {
            engines.files.delete(*id).await?;
            output::print_success(&format!("File {id} deleted"));
        }
    }
    Ok(())
}
