mod cli;
mod commands;
mod logger;

use clap::Parser;

use cli::Cli;
use commands::Context;
use fiche_client::FicheApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so clap sees its values as environment defaults
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logger::init_logger(&cli.logging.level, cli.logging.json, cli.logging.dir.as_deref())?;

    let config = cli.connection.client_config();
    tracing::debug!(api = %config.api_root(), timeout = config.timeout, "Using backend");

    let api = FicheApi::connect(&config)?;
    let ctx = Context { api, config };

    if let Err(e) = commands::run(cli.command, &ctx).await {
        tracing::debug!(error = ?e, "Command failed");
        return Err(e);
    }

    Ok(())
}
