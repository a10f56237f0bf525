use anyhow::{Context, Result};
use clap::Parser;
use gpui::{App, Application};
use tracing::info;
use tracing_subscriber::EnvFilter;

use click_chess::app;
use click_chess::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli
        .resolve_config()
        .context("failed to load configuration")?;

    info!(
        white = %config.players.white,
        black = %config.players.black,
        log = config.log.enabled,
        "starting click-chess"
    );

    Application::new().run(move |cx: &mut App| app::run(cx, config));
    Ok(())
}
