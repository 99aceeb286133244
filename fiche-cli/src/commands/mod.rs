//! Command handlers

mod dishes;
mod export;
mod menu;
mod reservation;
mod zenchef;

use fiche_client::{ClientConfig, ClientResult, FicheApi};

use crate::cli::Commands;

/// What every command needs
pub struct Context {
    pub api: FicheApi,
    pub config: ClientConfig,
}

pub async fn run(command: Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Menu { command } => menu::run(command, ctx).await,
        Commands::Reservation { command } => reservation::run(command, ctx).await,
        Commands::Dishes { course } => dishes::run(course, ctx).await,
        Commands::Pdf { command } => export::run(command, ctx).await,
        Commands::Zenchef { command } => zenchef::run(command, ctx).await,
    }
}

/// Client errors surface with the operator-facing message on top
trait Explain<T> {
    fn explain(self) -> anyhow::Result<T>;
}

impl<T> Explain<T> for ClientResult<T> {
    fn explain(self) -> anyhow::Result<T> {
        self.map_err(|e| {
            let message = e.user_message();
            anyhow::Error::new(e).context(message)
        })
    }
}
