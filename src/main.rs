use crate::config::{AppConfig, LoadOptions, LogFormat};
use crate::data::JsonFileSource;
use crate::router::{handle, AppState};
use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod data;
mod domain;
mod errors;
mod responses;
mod router;
mod seo;
mod templates;

#[cfg(test)]
mod tests;

fn init_logging(config: &AppConfig) {
    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    let builder = tracing_subscriber::fmt().with_target(false).with_env_filter(filter);
    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() {
    // 1. Configuration first, logging depends on it
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_logging(&config);

    let addr: SocketAddr = match config.server.bind_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(
                event_name = "system.bootstrap.bad_address",
                bind_address = %config.server.bind_address,
                error = %e,
                "invalid bind address"
            );
            std::process::exit(1);
        }
    };

    // 2. The dataset is re-read per request; a missing file only means empty pools
    let source = JsonFileSource::new(config.data.path.clone());
    if !source.path().exists() {
        tracing::warn!(
            event_name = "system.bootstrap.data_missing",
            path = %source.path().display(),
            "data file not found, serving empty listings"
        );
    }
    let state = AppState::new(source, config.site.clone());

    // 3. Start the server
    info!(
        event_name = "system.server.started",
        address = %addr,
        max_workers = config.server.max_workers,
        "starting server"
    );
    let server = Server::bind(&addr).max_workers(config.server.max_workers);

    let result = server.serve(move |req, _info| handle(req, &state));

    if let Err(e) = result {
        error!(event_name = "system.server.failed", error = %e, "server ended with error");
        std::process::exit(1);
    }

    info!(event_name = "system.server.stopped", "server shut down cleanly");
}
