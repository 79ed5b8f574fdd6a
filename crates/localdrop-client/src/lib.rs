pub mod app;
pub mod chat;
pub mod commands;
pub mod config;
pub mod events;
pub mod files;
pub mod host;
pub mod render;
pub mod state;
pub mod terminal;

use std::io::{self, BufReader};

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use localdrop_store::Database;

use crate::app::App;
use crate::config::ClientConfig;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::TerminalHost;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("localdrop_client=debug,localdrop_client_lib=debug,localdrop_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Open storage, restore state and run the terminal client until `quit` or EOF.
pub async fn run(config: ClientConfig) -> anyhow::Result<()> {
    tracing::info!("Starting LocalDrop terminal client");

    let db = match &config.db_path {
        Some(path) => Database::open_at(path)
            .with_context(|| format!("failed to open database at {}", path.display()))?,
        None => Database::new().context("failed to open database")?,
    };
    if let Some(path) = db.path() {
        tracing::info!(path = %path.display(), "database opened");
    }

    let state = AppState::load(db, &config);

    let (host, input) = TerminalHost::new(config.download_dir.clone());
    let mut app = App::new(state, host, config.page_url.clone());

    println!("{}", terminal::HELP);
    // Drawn before the reader starts so no command can interleave with it.
    app.handle(UiEvent::Load.into());

    // Detached: the thread blocks on stdin and ends with the process.
    let _reader = terminal::spawn_reader(BufReader::new(io::stdin()), app.sender(), input);

    app.run().await;
    tracing::info!("LocalDrop client stopped");
    Ok(())
}
