//! CLI administration tool for slugz.
//!
//! Registers and inspects slugs directly against the configured PostgreSQL
//! database, going through the same registry as the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a slug, picking a random one interactively
//! cargo run --bin admin -- slug create --url example.com
//!
//! # Register a chosen slug without prompts
//! cargo run --bin admin -- slug create --url example.com --slug docs -y
//!
//! # Show where a slug points
//! cargo run --bin admin -- slug get docs
//!
//! # Print a random slug candidate
//! cargo run --bin admin -- slug random
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `slugz::config`.

use slugz::application::services::SlugService;
use slugz::config::{GeneratorKind, load_from_env};
use slugz::infrastructure::persistence::PgSlugRepository;
use slugz::server::{connect_pool, run_migrations};
use slugz::utils::slug_generator::SlugGenerator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing slugz.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage slugs
    Slug {
        #[command(subcommand)]
        action: SlugAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SlugAction {
    /// Register a slug for a URL
    Create {
        /// Target URL; `http://` is assumed when no scheme is given
        #[arg(short, long)]
        url: String,

        /// Slug to register (random if omitted)
        #[arg(short, long)]
        slug: Option<String>,

        /// Accept the first random slug without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the URL a slug points to
    Get { slug: String },

    /// Print a random slug candidate
    Random,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Show database info
    Info,
}

type PgSlugService = SlugService<PgSlugRepository, dyn SlugGenerator>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slug {
            action: SlugAction::Random,
        } => print_random_slug()?,
        Commands::Slug {
            action: SlugAction::Create { url, slug, yes },
        } => create_slug(&connect_service().await?, url, slug, yes).await?,
        Commands::Slug {
            action: SlugAction::Get { slug },
        } => get_slug(&connect_service().await?, slug).await?,
        Commands::Db { action } => {
            let pool = connect_pool(&load_from_env()?).await?;
            handle_db_action(action, &pool).await?
        }
    }

    Ok(())
}

/// Builds a registry over the configured PostgreSQL database.
async fn connect_service() -> Result<PgSlugService> {
    let config = load_from_env()?;
    let pool = connect_pool(&config).await?;
    let repository = Arc::new(PgSlugRepository::new(Arc::new(pool)));

    Ok(SlugService::new(
        repository,
        config.slug_generator.build(),
        config.short_domain,
    ))
}

/// Prints a candidate from the configured generator. Needs no database.
fn print_random_slug() -> Result<()> {
    let generator = GeneratorKind::from_env()?.build();
    println!("{}", generator.generate().bright_yellow().bold());

    Ok(())
}

/// Registers a slug, offering random candidates until one is accepted when
/// none was given.
async fn create_slug(
    service: &PgSlugService,
    url: String,
    slug: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create slug".bright_blue().bold());
    println!();

    let slug = match slug {
        Some(s) => s,
        None => loop {
            let candidate = service.random_slug();
            println!("  Candidate: {}", candidate.bright_yellow().bold());

            if skip_confirm
                || Confirm::new()
                    .with_prompt("Use this slug?")
                    .default(true)
                    .interact()?
            {
                break candidate;
            }
        },
    };

    let built = service
        .build(&slug, &url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create slug: {}", e))?;

    println!();
    println!("{}", "Slug created".green().bold());
    println!("  Slug:  {}", built.record.slug.cyan());
    println!("  URL:   {}", built.record.url.bright_white());
    println!("  Short: {}", built.short_url.bright_yellow().bold());
    println!();

    Ok(())
}

async fn get_slug(service: &PgSlugService, slug: String) -> Result<()> {
    let record = service
        .lookup(&slug)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", slug, e))?;

    println!("  Slug:    {}", record.slug.cyan());
    println!("  URL:     {}", record.url.bright_white());
    println!(
        "  Created: {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!("  Short:   {}", service.short_url(&record.slug).bright_yellow());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            run_migrations(pool).await?;
            println!("{}", "Migrations applied".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let slugs_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM slugs")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Slugs:      {}",
                slugs_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
