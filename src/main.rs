use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use promptpal::app::config::{config_dir, AppConfig};
use promptpal::app::{r#loop::run_loop, state::AppState};
use promptpal::domain::store::SnippetStore;
use promptpal::infrastructure::file_store::TomlFileStore;
use promptpal::logging;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    let _log_guard = match config_dir() {
        Some(dir) => Some(logging::init_tracing(&dir)?),
        None => None,
    };

    // Load the store BEFORE terminal setup so a failure here doesn't leave
    // the terminal in raw mode.
    let config = AppConfig::load();
    let store_path = config
        .store_path()
        .ok_or_else(|| anyhow::anyhow!("cannot locate a home directory for the snippet store"))?;
    let store = Arc::new(TomlFileStore::new(store_path));
    let snapshot = store.get().await?;
    let app_state = AppState::new(&config, &snapshot);
    tracing::info!(path = %store.path().display(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(state) => {
            tracing::info!(chars = state.host.model().chars().count(), "exiting");
        }
        Err(err) => println!("{err:?}"),
    }

    Ok(())
}
