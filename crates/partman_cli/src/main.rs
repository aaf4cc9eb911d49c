//! Terminal front-end for the Part Manager catalog.
//!
//! # Responsibility
//! - Start diagnostic logging and the async runtime.
//! - Walk the user through login, then hand over to the catalog screen.

mod console;
mod screens;

use console::Console;
use log::info;
use partman_core::{default_log_level, init_logging, CatalogService, ConnectorConfig};
use screens::{login, Catalog};
use std::io;

#[tokio::main]
async fn main() -> io::Result<()> {
    let log_dir = std::env::temp_dir().join("partman").join("logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        partman_core::core_version()
    );

    let mut console = Console::new();
    let config = ConnectorConfig::default();
    let Some(session) = login(&mut console, &config).await? else {
        return Ok(());
    };

    let mut catalog = Catalog::new(CatalogService::new(session.parts()));
    let outcome = catalog.run(&mut console).await;
    drop(catalog);
    session.shutdown().await;
    outcome
}
