//! CLI administration tool for news-gateway.
//!
//! Inspects cache keys and cached entries, and checks the runtime
//! configuration without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Print the cache key a request maps to
//! cargo run --bin admin -- key search "rust"
//! cargo run --bin admin -- key range "rust" 2024-01-01 2024-01-31
//! cargo run --bin admin -- key location "Berlin"
//!
//! # Show a cached entry and its remaining TTL
//! cargo run --bin admin -- cache show search "rust"
//!
//! # Check configuration and Redis connectivity
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`: used by `cache show` and `check`
//! - `NEWS_API_KEY` (required by `check`)

use news_gateway::config::{self, Config, mask_connection_string};
use news_gateway::domain::entities::{NewsQuery, NormalizedResult};
use news_gateway::infrastructure::cache::{CacheService, RedisCache};
use news_gateway::infrastructure::upstream::NewsApiClient;
use news_gateway::utils::date_param::parse_iso_date;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing news-gateway.
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
    /// Print the cache key for a query
    Key {
        #[command(subcommand)]
        query: QueryArgs,
    },

    /// Cache operations
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Check configuration, Redis, and upstream client setup
    Check,
}

/// Query kinds, mirroring the `/news/*` endpoints.
#[derive(Subcommand)]
enum QueryArgs {
    /// Keyword search (`/news/search`)
    Search {
        q: String,
    },

    /// Keyword search within a date range (`/news/range`)
    Range {
        q: String,
        /// Start date, YYYY-MM-DD
        from_date: String,
        /// End date, YYYY-MM-DD
        to_date: String,
    },

    /// News about a location (`/news/location`)
    Location {
        location: String,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the cached entry for a query
    Show {
        #[command(subcommand)]
        query: QueryArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Key { query } => handle_key(query)?,
        Commands::Cache { action } => handle_cache_action(action).await?,
        Commands::Check => handle_check().await?,
    }

    Ok(())
}

/// Builds a [`NewsQuery`] with the same trimming and date rules as the HTTP handlers.
fn build_query(args: QueryArgs) -> Result<NewsQuery> {
    let query = match args {
        QueryArgs::Search { q } => NewsQuery::search(non_blank("q", &q)?),
        QueryArgs::Range {
            q,
            from_date,
            to_date,
        } => {
            let from = parse_iso_date("from_date", &from_date)?;
            let to = parse_iso_date("to_date", &to_date)?;
            NewsQuery::range(non_blank("q", &q)?, from, to)?
        }
        QueryArgs::Location { location } => {
            NewsQuery::location(non_blank("location", &location)?)
        }
    };

    Ok(query)
}

fn non_blank(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{} must not be blank", name);
    }
    Ok(trimmed.to_string())
}

fn handle_key(args: QueryArgs) -> Result<()> {
    let query = build_query(args)?;

    println!("{}", "🔑 Cache key".bright_blue().bold());
    println!();
    println!("  Params: {}", query.params().canonical_json().bright_black());
    println!("  Key:    {}", query.cache_key().bright_yellow());
    println!();

    Ok(())
}

async fn handle_cache_action(action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Show { query } => show_entry(build_query(query)?).await,
    }
}

/// Displays a cached entry with its remaining TTL.
///
/// # Output Format
///
/// ```text
/// 📦 Cached entry
///
///   Key:      news:search:5f1c...
///   TTL:      412s
///   Total:    1234
///   Articles: 10
///
///   1. Some headline (Example News)
/// ```
async fn show_entry(query: NewsQuery) -> Result<()> {
    let redis_url = Config::load_redis_url()
        .context("Redis is not configured (set REDIS_URL or REDIS_HOST)")?;

    let cache = RedisCache::connect(&redis_url)
        .await
        .context("Failed to connect to Redis")?;

    let key = query.cache_key();

    println!("{}", "📦 Cached entry".bright_blue().bold());
    println!();
    println!("  Key:      {}", key.bright_yellow());

    let Some(raw) = cache
        .get(&key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read entry: {}", e))?
    else {
        println!("{}", "  Not cached".yellow());
        println!();
        return Ok(());
    };

    let ttl = cache
        .ttl(&key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read TTL: {}", e))?;

    match ttl {
        Some(seconds) => println!("  TTL:      {}s", seconds.to_string().cyan()),
        None => println!("  TTL:      {}", "none".bright_black()),
    }

    let result: NormalizedResult = match serde_json::from_str(&raw) {
        Ok(result) => result,
        Err(e) => {
            println!("{} {}", "  ⚠️  Entry is not a valid result:".red(), e);
            println!("  Raw: {}", raw.bright_black());
            return Ok(());
        }
    };

    println!("  Total:    {}", result.total.to_string().bright_white().bold());
    println!("  Articles: {}", result.articles.len().to_string().bright_white());
    println!();

    for (i, article) in result.articles.iter().enumerate() {
        println!(
            "  {}. {} ({})",
            i + 1,
            article.title.as_deref().unwrap_or("<untitled>").cyan(),
            article
                .source
                .as_deref()
                .unwrap_or("unknown source")
                .bright_black()
        );
    }
    println!();

    Ok(())
}

/// Checks configuration and external dependencies.
async fn handle_check() -> Result<()> {
    println!("{}", "🔍 Checking configuration...".bright_blue().bold());
    println!();

    let config = config::load_from_env().context("Invalid configuration")?;
    println!("{}", "  ✅ Configuration is valid".green());

    let settings = config.news_api_settings()?;
    NewsApiClient::new(settings).context("Failed to build upstream HTTP client")?;
    println!(
        "  ✅ Upstream client ready: {}",
        config.news_api_url.bright_black()
    );

    match config.redis_url {
        Some(ref redis_url) => match RedisCache::connect(redis_url).await {
            Ok(_) => println!(
                "  ✅ Redis reachable: {}",
                mask_connection_string(redis_url).bright_black()
            ),
            Err(e) => println!(
                "{} {}",
                "  ❌ Redis unreachable, service will run without a cache:".red(),
                e
            ),
        },
        None => println!("{}", "  ℹ️  Redis not configured, in-memory cache".yellow()),
    }

    println!();
    Ok(())
}
