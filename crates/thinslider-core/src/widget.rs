//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle driven by the host:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: remember the bounds the host assigned
//! 3. **Paint**: emit text into a [`Canvas`]
//!
//! Input arrives through [`Widget::event`]. A widget that wants the host to
//! keep routing pointer motion to it after a press reports so through
//! [`Widget::has_capture`].
//!
//! # Examples
//!
//! ```
//! use thinslider_core::{TypeId, WidgetId};
//!
//! let id = WidgetId::new(42);
//! assert_eq!(id.0, 42);
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Accessible role reported to assistive tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// No specific role
    #[default]
    Generic,
    /// Static text
    Text,
    /// Range selector
    Slider,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Send {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept the bounds assigned by the host.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Draw into the canvas at the laid-out bounds.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event.
    ///
    /// Mouse positions are local to the widget's bounds. Returns a message
    /// when the event caused something the host may want to observe.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Whether the widget currently holds pointer capture.
    fn has_capture(&self) -> bool {
        false
    }

    /// Check if this widget is interactive (can receive focus/events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// A minimal abstraction over a grid of text cells.
pub trait Canvas {
    /// Draw text starting at the given cell. Text running past the canvas
    /// edge is clipped.
    fn draw_text(&mut self, text: &str, position: Point);

    /// Fill `rect` with `ch`.
    fn fill(&mut self, rect: Rect, ch: char);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label;

    impl Widget for Label {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn measure(&self, constraints: Constraints) -> Size {
            constraints.constrain(Size::new(5, 1))
        }

        fn layout(&mut self, bounds: Rect) -> LayoutResult {
            LayoutResult {
                size: bounds.size(),
            }
        }

        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.draw_text("label", Point::ORIGIN);
        }

        fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
            None
        }
    }

    #[test]
    fn test_widget_defaults() {
        let w = Label;
        assert!(!w.has_capture());
        assert!(!w.is_interactive());
        assert!(!w.is_focusable());
        assert_eq!(w.accessible_name(), None);
        assert_eq!(w.accessible_role(), AccessibleRole::Generic);
        assert_eq!(w.test_id(), None);
        assert_eq!(w.bounds(), Rect::default());
    }

    #[test]
    fn test_widget_type_id() {
        assert_eq!(Widget::type_id(&Label), TypeId::of::<Label>());
    }

    #[test]
    fn test_widget_measure() {
        let size = Label.measure(Constraints::loose(Size::new(3, 1)));
        assert_eq!(size, Size::new(3, 1));
    }
}
