//! Input handling for terminal applications.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};
use thinslider_core::{Event, Key, MouseButton, Point};

/// Host-level command a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Decrease the focused slider by one step
    StepLeft,
    /// Increase the focused slider by one step
    StepRight,
    /// Move focus to the next slider
    FocusNext,
    /// Move focus to the previous slider
    FocusPrev,
    /// Leave the application
    Quit,
}

/// Key binding configuration.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Key code.
    pub code: KeyCode,
    /// Required modifiers.
    pub modifiers: KeyModifiers,
    /// Bound action.
    pub action: Action,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers, action: Action) -> Self {
        Self {
            code,
            modifiers,
            action,
        }
    }

    /// Create a simple key binding without modifiers.
    #[must_use]
    pub const fn simple(code: KeyCode, action: Action) -> Self {
        Self::new(code, KeyModifiers::NONE, action)
    }

    /// Check if this binding matches a key event.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == self.code && event.modifiers.contains(self.modifiers)
    }
}

/// Converts crossterm events into widget events and resolves key bindings.
#[derive(Debug, Default)]
pub struct InputHandler {
    bindings: Vec<KeyBinding>,
}

impl InputHandler {
    /// Create an input handler with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Left/Right step, Tab/Down and BackTab/Up move focus, `q`/Esc/Ctrl+C quit.
    #[must_use]
    pub fn with_default_bindings() -> Self {
        let mut handler = Self::new();
        handler.add_binding(KeyBinding::simple(KeyCode::Left, Action::StepLeft));
        handler.add_binding(KeyBinding::simple(KeyCode::Right, Action::StepRight));
        handler.add_binding(KeyBinding::simple(KeyCode::Tab, Action::FocusNext));
        handler.add_binding(KeyBinding::simple(KeyCode::Down, Action::FocusNext));
        handler.add_binding(KeyBinding::simple(KeyCode::BackTab, Action::FocusPrev));
        handler.add_binding(KeyBinding::simple(KeyCode::Up, Action::FocusPrev));
        handler.add_binding(KeyBinding::simple(KeyCode::Char('q'), Action::Quit));
        handler.add_binding(KeyBinding::simple(KeyCode::Esc, Action::Quit));
        handler.add_binding(KeyBinding::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            Action::Quit,
        ));
        handler
    }

    /// Add a key binding. Earlier bindings win on conflicts.
    pub fn add_binding(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
    }

    /// Number of registered bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Find a matching binding for a key event.
    #[must_use]
    pub fn find_binding(&self, event: &KeyEvent) -> Option<&KeyBinding> {
        self.bindings.iter().find(|b| b.matches(event))
    }

    /// Action bound to a key event, if any.
    #[must_use]
    pub fn action_for(&self, event: &KeyEvent) -> Option<Action> {
        let action = self.find_binding(event).map(|b| b.action);
        if let Some(action) = action {
            log::debug!("{:?} {:?} -> {action:?}", event.modifiers, event.code);
        }
        action
    }

    /// Convert a crossterm event to a widget event.
    ///
    /// Mouse positions are screen positions; the receiver localizes them.
    #[must_use]
    pub fn convert(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Key(key) => Self::convert_key(key),
            CrosstermEvent::Mouse(mouse) => Self::convert_mouse(mouse),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            CrosstermEvent::FocusGained => Some(Event::FocusIn),
            CrosstermEvent::FocusLost => Some(Event::FocusOut),
            CrosstermEvent::Paste(_) => None,
        }
    }

    fn convert_key(key: KeyEvent) -> Option<Event> {
        let key = match key.code {
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Char(c) => Key::Char(c),
            // Unknown keys are ignored
            _ => return None,
        };

        Some(Event::KeyDown { key })
    }

    fn convert_mouse(mouse: MouseEvent) -> Option<Event> {
        let screen = Point::new(i32::from(mouse.column), i32::from(mouse.row));

        let event = match mouse.kind {
            MouseEventKind::Down(button) => Event::MouseDown {
                position: screen,
                screen,
                button: convert_button(button),
            },
            MouseEventKind::Up(button) => Event::MouseUp {
                position: screen,
                screen,
                button: convert_button(button),
            },
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Event::MouseMove {
                position: screen,
                screen,
            },
            MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => return None,
        };
        Some(event)
    }
}

const fn convert_button(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_binding_simple() {
        let binding = KeyBinding::simple(KeyCode::Char('q'), Action::Quit);
        assert_eq!(binding.action, Action::Quit);
        assert_eq!(binding.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_key_binding_with_modifiers() {
        let binding = KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(binding.matches(&event));
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!binding.matches(&plain));
    }

    #[test]
    fn test_key_binding_no_match() {
        let binding = KeyBinding::simple(KeyCode::Left, Action::StepLeft);
        let event = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert!(!binding.matches(&event));
    }

    #[test]
    fn test_input_handler_add_binding() {
        let mut handler = InputHandler::new();
        handler.add_binding(KeyBinding::simple(KeyCode::Char('x'), Action::Quit));
        assert_eq!(handler.binding_count(), 1);
    }

    // =========================================================================
    // Default bindings
    // =========================================================================

    #[test]
    fn test_default_bindings() {
        let handler = InputHandler::with_default_bindings();
        let cases = [
            (KeyCode::Left, KeyModifiers::NONE, Action::StepLeft),
            (KeyCode::Right, KeyModifiers::NONE, Action::StepRight),
            (KeyCode::Tab, KeyModifiers::NONE, Action::FocusNext),
            (KeyCode::Down, KeyModifiers::NONE, Action::FocusNext),
            (KeyCode::BackTab, KeyModifiers::SHIFT, Action::FocusPrev),
            (KeyCode::Up, KeyModifiers::NONE, Action::FocusPrev),
            (KeyCode::Char('q'), KeyModifiers::NONE, Action::Quit),
            (KeyCode::Esc, KeyModifiers::NONE, Action::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit),
        ];
        for (code, modifiers, action) in cases {
            let event = KeyEvent::new(code, modifiers);
            assert_eq!(handler.action_for(&event), Some(action), "{code:?}");
        }
    }

    #[test]
    fn test_unbound_key_has_no_action() {
        let handler = InputHandler::with_default_bindings();
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(handler.find_binding(&event).is_none());
        assert_eq!(handler.action_for(&event), None);
    }

    // =========================================================================
    // Event conversion
    // =========================================================================

    #[test]
    fn test_convert_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::BackTab, Key::BackTab),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::Char('z'), Key::Char('z')),
        ];
        for (code, key) in cases {
            let event = CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE));
            assert_eq!(handler.convert(event), Some(Event::KeyDown { key }));
        }
    }

    #[test]
    fn test_convert_unknown_key() {
        let handler = InputHandler::new();
        let event = CrosstermEvent::Key(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE));
        assert!(handler.convert(event).is_none());
    }

    #[test]
    fn test_convert_mouse_down() {
        let handler = InputHandler::new();
        let event = handler.convert(mouse(MouseEventKind::Down(CtMouseButton::Left), 7, 3));
        assert_eq!(
            event,
            Some(Event::MouseDown {
                position: Point::new(7, 3),
                screen: Point::new(7, 3),
                button: MouseButton::Left,
            })
        );
    }

    #[test]
    fn test_convert_mouse_up_right_button() {
        let handler = InputHandler::new();
        let event = handler.convert(mouse(MouseEventKind::Up(CtMouseButton::Right), 1, 2));
        assert!(matches!(
            event,
            Some(Event::MouseUp {
                button: MouseButton::Right,
                ..
            })
        ));
    }

    #[test]
    fn test_convert_drag_is_move() {
        let handler = InputHandler::new();
        let drag = handler.convert(mouse(MouseEventKind::Drag(CtMouseButton::Left), 12, 4));
        let moved = handler.convert(mouse(MouseEventKind::Moved, 12, 4));
        assert_eq!(drag, moved);
        assert_eq!(
            drag.and_then(|e| e.screen_position()),
            Some(Point::new(12, 4))
        );
    }

    #[test]
    fn test_convert_scroll_ignored() {
        let handler = InputHandler::new();
        assert!(handler.convert(mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
        assert!(handler.convert(mouse(MouseEventKind::ScrollRight, 0, 0)).is_none());
    }

    #[test]
    fn test_convert_resize_and_focus() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.convert(CrosstermEvent::Resize(100, 40)),
            Some(Event::Resize {
                width: 100,
                height: 40
            })
        );
        assert_eq!(handler.convert(CrosstermEvent::FocusGained), Some(Event::FocusIn));
        assert_eq!(handler.convert(CrosstermEvent::FocusLost), Some(Event::FocusOut));
        assert!(handler.convert(CrosstermEvent::Paste("x".into())).is_none());
    }
}
