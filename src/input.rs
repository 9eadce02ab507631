use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use petscene::SceneKind;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Key { key: KeyCode, mods: KeyModifiers },
    Click { col: u16, row: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UiAction {
    Quit,
    HelpToggle,
    Back,
    GoTo(SceneKind),
    Pat,
    Feed,
    Play,
    Splash,
    /// Move the food/toy selection.
    Select(i32),
    Breed(i32),
    ToggleKind,
    Reset,
    PointerAt { col: u16, row: u16 },
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => {
                out.push(InputEvent::Key {
                    key: k.code,
                    mods: k.modifiers,
                });
            }
            Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                out.push(InputEvent::Click {
                    col: m.column,
                    row: m.row,
                });
            }
            _ => {}
        }
        if out.len() >= 32 {
            break;
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_action(help_open: bool, ev: InputEvent) -> Option<UiAction> {
    let (key, mods) = match ev {
        InputEvent::Click { col, row } => {
            return (!help_open).then_some(UiAction::PointerAt { col, row });
        }
        InputEvent::Key { key, mods } => (key, mods),
    };

    if matches!(key, KeyCode::Char('c')) && mods.contains(KeyModifiers::CONTROL) {
        return Some(UiAction::Quit);
    }
    match key {
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => return Some(UiAction::HelpToggle),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(UiAction::Quit),
        KeyCode::Esc => return Some(UiAction::Back),
        _ => {}
    }
    if help_open {
        return None;
    }

    match key {
        KeyCode::Char(d @ '1'..='5') => {
            let i = d as usize - '1' as usize;
            Some(UiAction::GoTo(SceneKind::ALL[i]))
        }
        KeyCode::Char(' ') => Some(UiAction::Pat),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(UiAction::Feed),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Play),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UiAction::Splash),
        KeyCode::Char('[') | KeyCode::Left => Some(UiAction::Select(-1)),
        KeyCode::Char(']') | KeyCode::Right => Some(UiAction::Select(1)),
        KeyCode::Char('b') => Some(UiAction::Breed(1)),
        KeyCode::Char('B') => Some(UiAction::Breed(-1)),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(UiAction::ToggleKind),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> InputEvent {
        InputEvent::Key {
            key: KeyCode::Char(c),
            mods: KeyModifiers::NONE,
        }
    }

    #[test]
    fn digits_pick_scenes_in_order() {
        assert_eq!(map_event_to_action(false, key('1')), Some(UiAction::GoTo(SceneKind::Room)));
        assert_eq!(map_event_to_action(false, key('5')), Some(UiAction::GoTo(SceneKind::Sleep)));
        assert_eq!(map_event_to_action(false, key('6')), None);
    }

    #[test]
    fn help_swallows_everything_but_globals() {
        assert_eq!(map_event_to_action(true, key('f')), None);
        assert_eq!(map_event_to_action(true, InputEvent::Click { col: 1, row: 1 }), None);
        assert_eq!(map_event_to_action(true, key('h')), Some(UiAction::HelpToggle));
        assert_eq!(map_event_to_action(true, key('q')), Some(UiAction::Quit));
    }

    #[test]
    fn shift_b_cycles_backwards() {
        assert_eq!(map_event_to_action(false, key('b')), Some(UiAction::Breed(1)));
        assert_eq!(map_event_to_action(false, key('B')), Some(UiAction::Breed(-1)));
    }
}
