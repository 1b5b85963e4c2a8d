use std::path::PathBuf;

use anyhow::Context;
use bookreel::{config::Config, db, import};
use clap::Parser;

/// Load a JSON catalog of books, movies, reviews and adaptations.
#[derive(Debug, Parser)]
#[command(name = "load_catalog", version)]
struct Args {
    /// Path to the catalog JSON file.
    #[arg(long, short)]
    file: PathBuf,

    /// Overrides DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,bookreel=debug,sqlx=warn".to_string()),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let catalog: import::Catalog =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.file.display()))?;

    let db = db::connect_and_migrate(&config).await?;
    let summary = import::load_catalog(&db, &catalog).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
