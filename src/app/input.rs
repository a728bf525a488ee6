use crate::app::action::Action;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

const WHEEL_STEP: i16 = 3;

pub fn map_event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return match key.code {
                    KeyCode::Char('q' | 'c') => Some(Action::Quit),
                    KeyCode::Char('r') => Some(Action::RerenderHost),
                    KeyCode::Char('e') => Some(Action::CycleShape),
                    KeyCode::Char('t') => Some(Action::ToggleTheme),
                    _ => None,
                };
            }
            match key.code {
                KeyCode::PageUp => Some(Action::Scroll {
                    delta: -WHEEL_STEP,
                    column: 0,
                    row: 1,
                }),
                KeyCode::PageDown => Some(Action::Scroll {
                    delta: WHEEL_STEP,
                    column: 0,
                    row: 1,
                }),
                _ => Some(Action::HostKey(key)),
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::ScrollUp => Some(Action::Scroll {
                delta: -WHEEL_STEP,
                column: mouse.column,
                row: mouse.row,
            }),
            MouseEventKind::ScrollDown => Some(Action::Scroll {
                delta: WHEEL_STEP,
                column: mouse.column,
                row: mouse.row,
            }),
            _ => None,
        },
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEvent};

    #[test]
    fn test_release_events_are_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event_to_action(Event::Key(key)), None);
    }

    #[test]
    fn test_control_chords() {
        let chord = |c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        assert_eq!(map_event_to_action(chord('q')), Some(Action::Quit));
        assert_eq!(map_event_to_action(chord('c')), Some(Action::Quit));
        assert_eq!(map_event_to_action(chord('r')), Some(Action::RerenderHost));
        assert_eq!(map_event_to_action(chord('e')), Some(Action::CycleShape));
        assert_eq!(map_event_to_action(chord('x')), None);
    }

    #[test]
    fn test_plain_keys_go_to_the_host() {
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(
            map_event_to_action(Event::Key(down)),
            Some(Action::HostKey(down))
        );
    }

    #[test]
    fn test_mouse_mapping() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 4,
                row: 7,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Action::Click { column: 4, row: 7 })
        );
        assert_eq!(
            map_event_to_action(mouse(MouseEventKind::ScrollDown)),
            Some(Action::Scroll {
                delta: WHEEL_STEP,
                column: 4,
                row: 7
            })
        );
        assert_eq!(map_event_to_action(mouse(MouseEventKind::Moved)), None);
    }
}
