// src/main.rs — wbso entry point

use anyhow::Context;
use clap::Parser;

use wbso::cli::run::{run_invocation, RunContext};
use wbso::cli::Cli;
use wbso::infra::config::Config;
use wbso::infra::logger;
use wbso::infra::store::LedgerStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging (respects RUST_LOG / WBSO_LOG)
    logger::init_logging(logger::level_for_verbosity(cli.verbose));

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config (falls back to defaults if no config.toml)
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    let store = LedgerStore::new(config.resolve_ledger_path(cli.ledger.as_deref()));

    // Bad arguments are reported before the ledger is read or written.
    let command = match cli.into_command() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(());
        }
    };

    let ctx = RunContext {
        now: chrono::Local::now().naive_local(),
        export: config.export,
    };
    let mut stdout = std::io::stdout();
    let result = run_invocation(&store, command, &ctx, &mut stdout).await?;

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_user_facing() => {
            eprintln!("error: {e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
