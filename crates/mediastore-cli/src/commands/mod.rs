//! CLI command definitions and dispatch.

pub mod account;
pub mod file;
pub mod migrate;
pub mod recording;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use mediastore_bucket::S3BucketStore;
use mediastore_cache::notifier::RedisEventNotifier;
use mediastore_cache::provider::build_cache_provider;
use mediastore_core::config::AppConfig;
use mediastore_core::error::AppError;
use mediastore_core::traits::bucket::BucketStore;
use mediastore_core::traits::notifier::EventNotifier;
use mediastore_database::connection::DatabasePool;
use mediastore_database::repositories::account::AccountRepository;
use mediastore_database::repositories::file::FileRepository;
use mediastore_database::store::{AccountStore, FileStore};
use mediastore_service::{AccountEngine, FileEngine};

/// Mediastore — media storage management
#[derive(Debug, Parser)]
#[command(name = "mediastore", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (overlay merged onto config/default.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// File management
    File(file::FileArgs),
    /// Storage account management
    Account(account::AccountArgs),
    /// Recording bundle management
    Recording(recording::RecordingArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::File(args) => file::execute(args, &self.env).await,
            Commands::Account(args) => account::execute(args, &self.env).await,
            Commands::Recording(args) => recording::execute(args, &self.env).await,
            Commands::Migrate(args) => migrate::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for the chosen environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Fully wired engines for one CLI invocation.
pub struct Engines {
    pub accounts: Arc<AccountEngine>,
    pub files: Arc<FileEngine>,
}

/// Helper: connect all backends and wire the engines
pub async fn build_engines(config: &AppConfig) -> Result<Engines, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let cache = build_cache_provider(&config.cache).await?;
    let notifier: Arc<dyn EventNotifier> =
        Arc::new(RedisEventNotifier::connect(&config.notifier).await?);
    let bucket: Arc<dyn BucketStore> = Arc::new(S3BucketStore::connect(&config.bucket).await?);

    let file_store: Arc<dyn FileStore> =
        Arc::new(FileRepository::new(db.pool().clone(), cache.clone()));
    let account_store: Arc<dyn AccountStore> =
        Arc::new(AccountRepository::new(db.pool().clone(), cache));

    let accounts = Arc::new(AccountEngine::new(
        account_store,
        notifier.clone(),
        config.bucket.account_quota_bytes,
    ));
    let files = Arc::new(FileEngine::new(
        file_store,
        accounts.clone(),
        bucket,
        notifier,
        config.bucket.media_bucket.clone(),
        config.bucket.tmp_bucket.clone(),
    ));

    Ok(Engines { accounts, files })
}
