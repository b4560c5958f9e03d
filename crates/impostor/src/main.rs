use std::sync::Arc;

use impostor_lib::{catalog::Catalog, game_state::GameState, round::RngSource};
use tracing::metadata::LevelFilter;

mod console;
mod session;
mod ticker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    // Logs go to stderr so they stay out of the way of the game itself
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Impostor {}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(Catalog::builtin());
    let game = GameState::new(catalog.clone(), RngSource::from_entropy());
    let handle = session::start_session(game);

    console::run(handle, catalog).await
}
