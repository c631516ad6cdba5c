use std::path::Path;

use clap::Parser;

use cura_config::CuraConfig;
use cura_db::service::CuraService;
use cura_server::cli::{Cli, Commands};
use cura_server::{import, serve};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("curalink error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = CuraConfig::load_with_dotenv()?;
    if let Some(path) = &cli.database {
        config.database.path.clone_from(path);
    }

    match cli.command_or_default() {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            serve::serve(&config).await
        }
        Commands::Import { file } => {
            config.validate()?;
            let service =
                CuraService::new_local(&config.database.path, config.general.clone()).await?;
            let counts = import::import_file(&service, Path::new(&file)).await?;
            if !cli.quiet {
                println!(
                    "Imported {} publications, {} clinical trials, {} experts into {}",
                    counts.publications,
                    counts.clinical_trials,
                    counts.experts,
                    config.database.path
                );
            }
            Ok(())
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CURALINK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
