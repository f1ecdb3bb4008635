//! CLI administration tool for shortlink.
//!
//! Provides commands for database maintenance, link moderation and
//! statistics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! shortlink-admin db migrate
//!
//! # Check database connection
//! shortlink-admin db check
//!
//! # List the newest links (optionally of one owner)
//! shortlink-admin links list --owner user_2abc
//!
//! # Delete a link by its short code
//! shortlink-admin links delete spam-link
//!
//! # View statistics
//! shortlink-admin stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use shortlink::config::{Config, mask_connection_string};
use shortlink::domain::entities::Link;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "shortlink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect and moderate links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show statistics
    Stats,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Apply pending migrations
    Migrate,

    /// Check database connection
    Check,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List the newest links
    List {
        /// Only show links of this owner
        #[arg(short, long)]
        owner: Option<String>,

        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Delete a link (and its click records) by short code
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
    }

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to migrate")?;

            println!("{}", "✅ Database schema is up to date".green().bold());
        }
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    match action {
        LinksAction::List { owner, limit } => list_links(pool, owner, limit).await,
        LinksAction::Delete { code, yes } => {
            let repo = PgLinkRepository::new(Arc::new(pool.clone()));
            delete_link(&repo, &code, yes).await
        }
    }
}

/// Lists links, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID    Code         Clicks   Owner              Created           Destination
///   ───────────────────────────────────────────────────────────────────────────
///   42    docs-2026    17       user_2abc          2026-01-15 10:30  https://example.com/docs
/// ```
async fn list_links(pool: &PgPool, owner: Option<String>, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = sqlx::query_as::<_, Link>(
        r#"
        SELECT id, code, url, owner_id, clicks, created_at
        FROM links
        WHERE ($1::text IS NULL OR owner_id = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2
        "#,
    )
    .bind(owner.as_deref())
    .bind(limit.clamp(1, 1000))
    .fetch_all(pool)
    .await?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<8} {:<18} {:<17} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<12} {:<8} {:<18} {:<17} {}",
            link.id.to_string().bright_black(),
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.owner_id,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link by code after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Click records are removed by the database cascade
async fn delete_link(repo: &PgLinkRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete link".bright_blue().bold());
    println!();

    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Code:        {}", link.code.cyan());
    println!("  Destination: {}", link.url);
    println!("  Owner:       {}", link.owner_id.bright_black());
    println!("  Clicks:      {}", link.clicks.to_string().bright_green());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(link.id, &link.owner_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links and distinct owners
/// - Redirects counted on links
/// - Stored click detail records
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, owners_count, redirects): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(DISTINCT owner_id), COALESCE(SUM(clicks), 0)::BIGINT FROM links",
    )
    .fetch_one(pool)
    .await?;

    let click_records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Owners:        {}",
        owners_count.to_string().bright_green().bold()
    );
    println!(
        "  Redirects:     {}",
        redirects.to_string().bright_green().bold()
    );
    println!(
        "  Click records: {}",
        click_records.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}
