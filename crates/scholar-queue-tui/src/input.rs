use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::TextInput => map_key_text_input(key),
            }
        }
        Event::Paste(text) => Action::InputPaste(text.clone()),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::DragTo(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::Release(mouse.column, mouse.row),
        _ => Action::None,
    }
}

/// Panel shortcuts are case-insensitive and only live outside the text box.
fn map_key_normal(key: &KeyEvent) -> Action {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Action::None;
    }
    match key.code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Action::Quit,
            'b' => Action::Begin,
            'c' => Action::Clear,
            's' => Action::Save,
            'n' => Action::Next,
            'o' => Action::Reopen,
            'i' => Action::FocusInput,
            '?' => Action::ToggleHelp,
            _ => Action::None,
        },
        KeyCode::Tab | KeyCode::Enter => Action::FocusInput,
        KeyCode::Esc => Action::Dismiss,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => Action::LeaveInput,
        KeyCode::Enter => Action::InputChar('\n'),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn panel_keys_in_normal_mode() {
        let mode = InputMode::Normal;
        assert_eq!(map_event(&press(KeyCode::Char('b')), &mode), Action::Begin);
        assert_eq!(map_event(&press(KeyCode::Char('c')), &mode), Action::Clear);
        assert_eq!(map_event(&press(KeyCode::Char('s')), &mode), Action::Save);
        assert_eq!(map_event(&press(KeyCode::Char('n')), &mode), Action::Next);
    }

    #[test]
    fn panel_keys_ignore_case() {
        let mode = InputMode::Normal;
        let shifted = |c| press_with(KeyCode::Char(c), KeyModifiers::SHIFT);
        assert_eq!(map_event(&shifted('B'), &mode), Action::Begin);
        assert_eq!(map_event(&shifted('C'), &mode), Action::Clear);
        assert_eq!(map_event(&shifted('S'), &mode), Action::Save);
        assert_eq!(map_event(&shifted('N'), &mode), Action::Next);
    }

    #[test]
    fn panel_keys_type_into_the_text_box() {
        let mode = InputMode::TextInput;
        for c in ['b', 'c', 's', 'n', 'q'] {
            assert_eq!(map_event(&press(KeyCode::Char(c)), &mode), Action::InputChar(c));
        }
        assert_eq!(map_event(&press(KeyCode::Enter), &mode), Action::InputChar('\n'));
        assert_eq!(map_event(&press(KeyCode::Esc), &mode), Action::LeaveInput);
    }

    #[test]
    fn modified_keys_are_not_shortcuts() {
        let mode = InputMode::Normal;
        let ev = press_with(KeyCode::Char('s'), KeyModifiers::ALT);
        assert_eq!(map_event(&ev, &mode), Action::None);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ev = press_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_event(&ev, &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&ev, &InputMode::TextInput), Action::Quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event(&Event::Key(key), &InputMode::Normal), Action::None);
    }

    #[test]
    fn mouse_drag_sequence() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 7,
                row: 3,
                modifiers: KeyModifiers::NONE,
            })
        };
        let mode = InputMode::Normal;
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left)), &mode),
            Action::ClickAt(7, 3)
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Drag(MouseButton::Left)), &mode),
            Action::DragTo(7, 3)
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Up(MouseButton::Left)), &mode),
            Action::Release(7, 3)
        );
    }

    #[test]
    fn paste_goes_to_input() {
        let ev = Event::Paste("a\nb".into());
        assert_eq!(
            map_event(&ev, &InputMode::Normal),
            Action::InputPaste("a\nb".into())
        );
    }
}
