use crate::app::{action::Action, input::map_event_to_action, reducer, state::AppState, ui};
use crate::domain::snippets::StoreChange;
use crate::domain::store::SnippetStore;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState,
    store: Arc<dyn SnippetStore>,
) -> Result<AppState> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState,
    store: Arc<dyn SnippetStore>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<AppState> {
    let mut interval = interval(TICK_RATE);

    // Store Watcher
    let mut store_rx = match store.subscribe() {
        Ok(rx) => Some(rx),
        Err(err) => {
            tracing::warn!(%err, "snippet store changes will not be picked up");
            app_state.set_status("Not watching the snippet store");
            None
        }
    };

    let size = terminal.size()?;
    app_state.relayout(Rect::new(0, 0, size.width, size.height));

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = match res {
                    Ok(e) => e,
                    Err(e) => return Err(e.into()),
                };
                map_event_to_action(event)
            },

            // Store changes
            change = next_change(&mut store_rx) => match change {
                Some(change) => Some(Action::StoreChanged(change)),
                None => {
                    tracing::debug!("snippet store watcher stopped");
                    store_rx = None;
                    None
                }
            },
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            reducer::update(&mut app_state, action);
            if app_state.should_quit {
                break;
            }
        }
    }

    Ok(app_state)
}

async fn next_change(rx: &mut Option<mpsc::Receiver<StoreChange>>) -> Option<StoreChange> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
