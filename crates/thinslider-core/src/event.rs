//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Mouse events carry both the widget-local position and the screen position.
/// Local positions are used for hit-testing; screen positions measure drag
/// distance, which stays meaningful after the pointer leaves the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved
    MouseMove {
        /// Position relative to the receiving widget
        position: Point,
        /// Position on screen
        screen: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position relative to the receiving widget
        position: Point,
        /// Position on screen
        screen: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position relative to the receiving widget
        position: Point,
        /// Position on screen
        screen: Point,
        /// Button released
        button: MouseButton,
    },
    /// The host withdrew pointer capture from the widget.
    CaptureLost,
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
    /// Terminal resized
    Resize {
        /// New width
        width: u16,
        /// New height
        height: u16,
    },
}

impl Event {
    /// Screen position of a mouse event, if this is one.
    #[must_use]
    pub const fn screen_position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { screen, .. }
            | Self::MouseDown { screen, .. }
            | Self::MouseUp { screen, .. } => Some(*screen),
            _ => None,
        }
    }

    /// Re-target a mouse event at a widget whose top-left corner sits at `origin`.
    ///
    /// Non-mouse events are returned unchanged.
    #[must_use]
    pub fn localized(&self, origin: Point) -> Self {
        match self {
            Self::MouseMove { screen, .. } => Self::MouseMove {
                position: *screen - origin,
                screen: *screen,
            },
            Self::MouseDown { screen, button, .. } => Self::MouseDown {
                position: *screen - origin,
                screen: *screen,
                button: *button,
            },
            Self::MouseUp { screen, button, .. } => Self::MouseUp {
                position: *screen - origin,
                screen: *screen,
                button: *button,
            },
            other => other.clone(),
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Tab
    Tab,
    /// Shift+Tab
    BackTab,
    /// Enter
    Enter,
    /// Escape
    Escape,
    /// Printable character
    Char(char),
}
