use crate::app::action::Action;
use crate::app::state::AppState;
use crate::domain::dom::NodeId;
use crate::engine::navigator::Key;
use crate::engine::{Dispatch, HostEvent};
use crate::theme::PaletteType;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use std::time::Instant;

/// Upper bound on notification rounds per action; a host that keeps
/// mutating in response to its own input would otherwise spin.
const MAX_SETTLE_ROUNDS: usize = 8;

pub fn update(state: &mut AppState, action: Action) {
    let was_open = state.engine.overlay().is_visible();
    let was_bound = state.engine.active_element();

    match action {
        Action::Tick => state.expire_status(Instant::now()),
        Action::Quit => state.should_quit = true,
        Action::Resize(w, h) => {
            state.relayout(Rect::new(0, 0, w, h));
            state
                .engine
                .handle(&mut state.host.document, HostEvent::Resize);
        }
        Action::HostKey(key) => on_host_key(state, key),
        Action::Click { column, row } => {
            let target = state
                .host
                .document
                .hit_test(f64::from(column), f64::from(row));
            state
                .engine
                .handle(&mut state.host.document, HostEvent::Click { target });
        }
        Action::Scroll { delta, column, row } => {
            let target = state
                .host
                .document
                .hit_test(f64::from(column), f64::from(row));
            state.host.scroll_by(delta);
            state
                .engine
                .handle(&mut state.host.document, HostEvent::Scroll { target });
        }
        Action::RerenderHost => {
            state.host.rerender();
            state.log(format!("host re-rendered composer as {}", state.host.input()));
        }
        Action::CycleShape => {
            state.host.cycle_shape();
            state.log(format!("host composer is now a {}", state.host.shape().label()));
        }
        Action::ToggleTheme => {
            let next = match state.palette_type {
                PaletteType::Light => PaletteType::Dark,
                PaletteType::Dark => PaletteType::Light,
            };
            state.set_palette(next);
            state.set_status(format!("Theme: {}", next.label()));
        }
        Action::StoreChanged(change) => {
            state
                .engine
                .handle(&mut state.host.document, HostEvent::StoreChanged(change));
            state.log(format!(
                "store changed: {} snippets, trigger {}",
                state.engine.cache().snippets().len(),
                state.engine.cache().trigger()
            ));
        }
    }

    settle(state);
    report(state, was_open, was_bound);
}

/// Delivers what the last action left queued on the page: synthetic input
/// events first, then the batched mutation notice.
pub fn settle(state: &mut AppState) {
    for _ in 0..MAX_SETTLE_ROUNDS {
        let dispatched = state.host.document.take_dispatched();
        if !dispatched.is_empty() {
            state.host.sync_model();
        }
        for target in &dispatched {
            state
                .engine
                .handle(&mut state.host.document, HostEvent::Input { target: *target });
        }

        let mutated = state.host.document.take_mutations();
        if mutated {
            state
                .engine
                .handle(&mut state.host.document, HostEvent::Mutations);
        }

        if dispatched.is_empty() && !mutated {
            return;
        }
    }
    tracing::warn!("host kept changing after {MAX_SETTLE_ROUNDS} rounds");
}

/// The engine sees the key first; the page only applies it when the engine
/// did not prevent the default.
fn on_host_key(state: &mut AppState, key: KeyEvent) {
    let target = state.host.event_target();
    let dispatch = state.engine.handle(
        &mut state.host.document,
        HostEvent::KeyDown {
            target,
            key: engine_key(&key),
        },
    );
    if dispatch == Dispatch::DefaultPrevented {
        return;
    }
    if state.host.apply_key(&key) {
        let target = state.host.event_target();
        state
            .engine
            .handle(&mut state.host.document, HostEvent::Input { target });
    }
}

pub fn engine_key(key: &KeyEvent) -> Key {
    match key.code {
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

fn report(state: &mut AppState, was_open: bool, was_bound: Option<NodeId>) {
    let bound = state.engine.active_element();
    if bound != was_bound {
        match bound {
            Some(element) => state.log(format!("bound to {element}")),
            None => state.log("lost the composer"),
        }
    }

    let open = state.engine.overlay().is_visible();
    if open && !was_open {
        let rows = state.engine.overlay().rows().len();
        state.log(format!("suggestions opened ({rows})"));
    } else if was_open && !open {
        state.log("suggestions closed");
    }
}
