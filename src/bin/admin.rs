//! CLI administration tool for link-lifecycle.
//!
//! Provides commands for inspecting links, viewing statistics, running an
//! expiry sweep by hand, and checking the database without HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Remove expired links now
//! cargo run --bin admin -- sweep
//!
//! # Show one link
//! cargo run --bin admin -- link show 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`).

use link_lifecycle::application::services::{DynLinkService, LinkService};
use link_lifecycle::config;
use link_lifecycle::domain::cancellation::Cancellation;
use link_lifecycle::domain::repositories::{LinkRepository, VisitRepository};
use link_lifecycle::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use link_lifecycle::server::connect_pool;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Deadline for a single admin operation against the store.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// CLI tool for managing link-lifecycle.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Remove expired links now
    Sweep {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Show a link by id
    Show {
        /// Link id
        id: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Sweep { yes } => handle_sweep(&pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(pool: &PgPool) -> DynLinkService {
    let pool = Arc::new(pool.clone());
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let visits: Arc<dyn VisitRepository> = Arc::new(PgVisitRepository::new(pool));
    LinkService::new(links, visits)
}

/// Dispatches link inspection commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    match action {
        LinkAction::Show { id } => {
            let service = link_service(pool);
            let cancel = Cancellation::none().with_timeout(COMMAND_TIMEOUT);

            let link = service
                .get_link(&cancel, &id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load link {}: {}", id, e))?;

            let status = if link.is_expired_at(Utc::now()) {
                "EXPIRED".red()
            } else {
                "ACTIVE".green()
            };

            println!("{}", "🔗 Link".bright_blue().bold());
            println!();
            println!("  ID:      {}", link.id.bright_black());
            println!("  Title:   {}", link.title.cyan());
            println!("  URL:     {}", link.url.bright_white());
            println!(
                "  Created: {}",
                link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
            );
            println!(
                "  Expires: {}",
                link.expires_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
            );
            println!("  Clicks:  {}", link.clicks.to_string().bright_green().bold());
            println!("  Status:  {}", status);
            println!();
        }
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links and how many are already expired
/// - Sum of all click counters
/// - Number of recorded visits
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expires_at < $1")
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    let clicks_total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
        .fetch_one(pool)
        .await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired:       {}",
        expired_count.to_string().yellow().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_total.to_string().bright_green().bold()
    );
    println!(
        "  Visits:        {}",
        visits_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Runs one expiry sweep, the same one the server runs periodically.
async fn handle_sweep(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Expiry Sweep".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all links whose expiry is in the past?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = link_service(pool);
    let cancel = Cancellation::none().with_timeout(COMMAND_TIMEOUT);

    let removed = service
        .cleanup_expired_links(&cancel)
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "{} {}",
        "✅ Removed expired links:".green().bold(),
        removed.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
