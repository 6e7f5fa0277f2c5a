use std::path::{Path, PathBuf};

use anyhow::Context;
use bookswap_kernel::settings::Settings;
use bookswap_store::Fixture;
use clap::{Parser, Subcommand};
use serde_json::json;

/// Bookswap marketplace command line.
#[derive(Parser)]
#[command(name = "bookswap-cli")]
#[command(about = "Run and inspect the Bookswap marketplace")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Print the resolved settings as JSON
    Settings,
    /// Validate a store fixture and report its collections
    CheckFixture {
        /// Path to the fixture JSON file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load Bookswap settings")?;

    match cli.command {
        Command::Serve => {
            bookswap_telemetry::init(&settings.telemetry)?;
            bookswap_app::bootstrap::run(settings).await
        }
        Command::Settings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
        Command::CheckFixture { path } => check_fixture(&settings, &path),
    }
}

fn check_fixture(settings: &Settings, path: &Path) -> anyhow::Result<()> {
    bookswap_telemetry::init(&settings.telemetry)?;

    let fixture = Fixture::load(path)
        .with_context(|| format!("invalid fixture {}", path.display()))?;

    let state = bookswap_app::bootstrap::build_state(&Settings::default())?;
    let declared = bookswap_app::bootstrap::build_registry(&state).collect_collections();

    let summary = fixture.summary();
    let unknown: Vec<&str> = summary
        .keys()
        .copied()
        .filter(|name| !declared.contains_key(*name))
        .collect();
    for name in &unknown {
        tracing::warn!(collection = %name, "no module reads this collection");
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "path": path.display().to_string(),
            "collections": summary,
            "unknown": unknown,
        }))?
    );
    Ok(())
}
