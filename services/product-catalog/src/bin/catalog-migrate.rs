//! catalog-migrate - 数据库迁移工具
//!
//! ```bash
//! catalog-migrate up
//! catalog-migrate down
//! catalog-migrate status
//! ```

use catalog_adapter_postgres::{MigrationManager, PostgresConfig, create_pool};
use catalog_config::AppConfig;
use catalog_telemetry::init_tracing;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use tracing::info;

use product_catalog::migrations;

#[derive(Parser)]
#[command(name = "catalog-migrate")]
#[command(about = "Product catalog database migrations", long_about = None)]
struct Cli {
    /// 配置目录
    #[arg(long, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Roll back the latest applied migration
    Down,
    /// Show applied migrations
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config_dir)?;
    init_tracing(&config.telemetry.log_level);

    let pool = create_pool(&PostgresConfig::new(config.database.url.expose_secret())).await?;
    let manager = MigrationManager::new(pool);
    let known = migrations::all();

    match cli.command {
        Command::Up => {
            let result = manager.migrate(&known).await?;
            info!(applied = ?result.applied, skipped = ?result.skipped, "Migrations applied");
        }
        Command::Down => match manager.rollback_latest(&known).await? {
            Some(version) => info!(version, "Rolled back"),
            None => info!("Nothing to roll back"),
        },
        Command::Status => {
            let current = manager.current_version().await?;
            for record in manager.applied_migrations().await? {
                println!(
                    "{}  {}  {}",
                    record.version,
                    record.name,
                    record.applied_at.to_rfc3339()
                );
            }
            let pending = known
                .iter()
                .filter(|m| current.is_none_or(|v| m.version > v))
                .count();
            println!("current: {:?}, pending: {}", current, pending);
        }
    }

    Ok(())
}
