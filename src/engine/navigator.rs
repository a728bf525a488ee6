use crate::domain::dom::Document;
use crate::engine::overlay::SuggestionOverlay;

/// Keys the navigator cares about; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Tab,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Not intercepted; the host page handles the key.
    PassThrough,
    /// Highlight moved; default prevented.
    Moved,
    /// Commit the highlighted row; default prevented.
    Commit { index: usize, append_newline: bool },
    /// Overlay closed without committing; the key still reaches the host.
    Dismissed,
}

/// Open/Closed is the overlay's visibility; the navigator keeps no state of its own.
pub fn navigate(overlay: &mut SuggestionOverlay, doc: &mut Document, key: Key) -> NavOutcome {
    if !overlay.is_visible() || overlay.rows().is_empty() {
        return NavOutcome::PassThrough;
    }

    match key {
        Key::ArrowDown => {
            overlay.select_next(doc);
            NavOutcome::Moved
        }
        Key::ArrowUp => {
            overlay.select_prev(doc);
            NavOutcome::Moved
        }
        Key::Enter | Key::Tab => match overlay.selected_index() {
            Some(index) => NavOutcome::Commit {
                index,
                append_newline: key == Key::Tab,
            },
            None => NavOutcome::PassThrough,
        },
        Key::Escape => {
            overlay.hide(doc);
            NavOutcome::Dismissed
        }
        Key::Other => NavOutcome::PassThrough,
    }
}
