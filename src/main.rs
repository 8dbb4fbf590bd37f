mod app;
mod config;
mod domain;
mod models;
mod net;
mod ui;

use clap::Parser;
use gpui::{App, Application};
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::parse();

    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| anyhow::anyhow!("invalid log filter {:?}: {e}", config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Application::new().run(move |cx: &mut App| {
        if let Err(err) = app::run(cx, config) {
            tracing::error!("failed to open board window: {err:#}");
            cx.quit();
        }
    });
    Ok(())
}
