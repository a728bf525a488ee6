use crate::domain::snippets::StoreChange;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Host page ---
    /// A key pressed in the composer; the engine sees it before the page does.
    HostKey(KeyEvent),
    Click { column: u16, row: u16 },
    Scroll { delta: i16, column: u16, row: u16 },
    RerenderHost,
    CycleShape,
    ToggleTheme,

    // --- Async Results ---
    StoreChanged(StoreChange),
}
