//! Maps raw terminal events onto [`Action`]s using the rectangles of the
//! most recent layout.
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::Action;
use crate::types::PlacedItem;

pub fn dispatch(event: &Event, placed: &[PlacedItem]) -> Action {
    match event {
        Event::Key(key) if is_quit_key(key) => Action::Quit,
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => match hit_test(placed, *column, *row) {
            Some(hit) => Action::Delete(hit.item.identifier.clone()),
            None => Action::None,
        },
        _ => Action::None,
    }
}

/// The first placed item whose rectangle contains the point. Overlaps
/// resolve to whichever item was placed first.
pub fn hit_test(placed: &[PlacedItem], x: u16, y: u16) -> Option<&PlacedItem> {
    placed.iter().find(|p| p.rect.contains(x, y))
}

fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), modifiers) => modifiers.contains(KeyModifiers::CONTROL),
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayState, Item, Rect};
    use crossterm::event::KeyEventState;

    fn placed(name: &str, x0: u16, y0: u16) -> PlacedItem {
        let item = Item::new(name);
        let width = name.len() as u16 + 2;
        PlacedItem {
            item,
            rect: Rect {
                x0,
                y0,
                x1: x0 + width,
                y1: y0 + 3,
            },
        }
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn ctrl_c_q_and_esc_quit() {
        assert_eq!(
            dispatch(&key(KeyCode::Char('c'), KeyModifiers::CONTROL), &[]),
            Action::Quit
        );
        assert_eq!(dispatch(&key(KeyCode::Char('q'), KeyModifiers::NONE), &[]), Action::Quit);
        assert_eq!(dispatch(&key(KeyCode::Esc, KeyModifiers::NONE), &[]), Action::Quit);
    }

    #[test]
    fn other_keys_and_releases_do_nothing() {
        assert_eq!(dispatch(&key(KeyCode::Char('c'), KeyModifiers::NONE), &[]), Action::None);
        assert_eq!(dispatch(&key(KeyCode::Enter, KeyModifiers::NONE), &[]), Action::None);

        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(dispatch(&release, &[]), Action::None);
    }

    #[test]
    fn click_inside_a_label_deletes_it() {
        let layout = vec![placed("web", 10, 5), placed("db", 40, 12)];
        assert_eq!(dispatch(&click(12, 6), &layout), Action::Delete("web".into()));
        assert_eq!(dispatch(&click(41, 13), &layout), Action::Delete("db".into()));
    }

    #[test]
    fn click_on_the_edges_counts_as_a_hit() {
        let layout = vec![placed("web", 10, 5)];
        assert_eq!(dispatch(&click(10, 5), &layout), Action::Delete("web".into()));
        assert_eq!(dispatch(&click(15, 8), &layout), Action::Delete("web".into()));
    }

    #[test]
    fn click_outside_every_label_does_nothing() {
        let layout = vec![placed("web", 10, 5), placed("db", 40, 12)];
        assert_eq!(dispatch(&click(0, 0), &layout), Action::None);
        assert_eq!(dispatch(&click(16, 6), &layout), Action::None);
        assert_eq!(dispatch(&click(12, 9), &layout), Action::None);
    }

    #[test]
    fn overlapping_labels_resolve_to_the_first_placed() {
        let layout = vec![placed("first", 10, 5), placed("second", 12, 6)];
        assert_eq!(dispatch(&click(13, 7), &layout), Action::Delete("first".into()));
    }

    #[test]
    fn marked_items_stay_clickable() {
        let mut item = placed("web", 10, 5);
        item.item.display_state = DisplayState::MarkedForRemoval;
        assert_eq!(dispatch(&click(11, 6), &[item]), Action::Delete("web".into()));
    }

    #[test]
    fn only_left_button_presses_count() {
        let layout = vec![placed("web", 10, 5)];
        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 11,
            row: 6,
            modifiers: KeyModifiers::NONE,
        });
        let moved = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 11,
            row: 6,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(dispatch(&right, &layout), Action::None);
        assert_eq!(dispatch(&moved, &layout), Action::None);
    }
}
