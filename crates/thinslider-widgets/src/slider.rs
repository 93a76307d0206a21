//! Thin slider widget for value selection.

use crate::bar::{BarRender, DisplayMode};
use crate::drag::{BarGeometry, DragController, GrabState};
use crate::error::ConfigError;
use crate::notify::{ChangeNotifier, SliderChanged};
use crate::range::RangeModel;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use thinslider_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Constraints, Event, Key, MouseButton, Point, Rect, Size, TypeId, Widget, WidgetId,
};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

const fn default_step() -> i64 {
    1
}

/// Declarative slider description, as found in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Optional identifier carried in change messages
    #[serde(default)]
    pub id: Option<String>,
    /// Lower bound
    pub min: i64,
    /// Upper bound
    pub max: i64,
    /// Step increment
    #[serde(default = "default_step")]
    pub step: i64,
    /// Initial value, `min` when absent
    #[serde(default)]
    pub value: Option<i64>,
    /// Label mode
    #[serde(default)]
    pub display: DisplayMode,
}

impl SliderConfig {
    /// A config for `[min, max]` with step 1 and no label.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            id: None,
            min,
            max,
            step: 1,
            value: None,
            display: DisplayMode::None,
        }
    }
}

/// Single-row slider drawn with block glyphs.
///
/// Every value write (keyboard step, pointer, or [`ThinSlider::set_value`])
/// clamps into range and emits a [`SliderChanged`] through the injected
/// [`ChangeNotifier`], even when the value did not change.
#[derive(Debug)]
pub struct ThinSlider {
    widget_id: WidgetId,
    name: Option<String>,
    range: RangeModel,
    value: i64,
    percent: f64,
    display: DisplayMode,
    padding_left: u16,
    padding_right: u16,
    disabled: bool,
    accessible_name_value: Option<String>,
    bounds: Rect,
    drag: DragController,
    notifier: ChangeNotifier,
}

impl ThinSlider {
    /// Create a slider positioned at the range minimum.
    #[must_use]
    pub fn new(range: RangeModel) -> Self {
        Self {
            widget_id: WidgetId::new(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed)),
            name: None,
            range,
            value: range.min(),
            percent: 0.0,
            display: DisplayMode::None,
            padding_left: 0,
            padding_right: 0,
            disabled: false,
            accessible_name_value: None,
            bounds: Rect::default(),
            drag: DragController::new(&range, range.min()),
            notifier: ChangeNotifier::none(),
        }
    }

    /// Build a slider from its declarative description.
    pub fn from_config(config: &SliderConfig) -> Result<Self, ConfigError> {
        let range = RangeModel::new(config.min, config.max, config.step)?;
        let mut slider = Self::new(range).display(config.display);
        if let Some(value) = config.value {
            slider = slider.value(value);
        }
        if let Some(id) = &config.id {
            slider = slider.with_id(id.clone());
        }
        Ok(slider)
    }

    /// Set the initial value (clamped). Does not notify.
    #[must_use]
    pub fn value(mut self, value: i64) -> Self {
        self.value = self.range.clamp(value);
        self.percent = self.range.percent(self.value);
        self.drag.sync(&self.range, self.value);
        self
    }

    /// Set the label mode.
    #[must_use]
    pub const fn display(mut self, display: DisplayMode) -> Self {
        self.display = display;
        self
    }

    /// Set the identifier carried in change messages.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.name = Some(id.into());
        self
    }

    /// Set horizontal padding inside the bounds.
    #[must_use]
    pub const fn padding(mut self, left: u16, right: u16) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self
    }

    /// Set where change messages go.
    #[must_use]
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Replace the notifier on an existing slider.
    pub fn set_notifier(&mut self, notifier: ChangeNotifier) {
        self.notifier = notifier;
    }

    /// Get current value.
    #[must_use]
    pub const fn get_value(&self) -> i64 {
        self.value
    }

    /// Percentage of the range covered by the value.
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// The validated range.
    #[must_use]
    pub const fn range(&self) -> &RangeModel {
        &self.range
    }

    /// Label mode.
    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display
    }

    /// Instance identity.
    #[must_use]
    pub const fn widget_id(&self) -> WidgetId {
        self.widget_id
    }

    /// User-assigned identifier.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Continuous drag position.
    #[must_use]
    pub const fn virtual_position(&self) -> f64 {
        self.drag.virtual_position()
    }

    /// Current grab state.
    #[must_use]
    pub const fn grab_state(&self) -> GrabState {
        self.drag.state()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_grabbed(&self) -> bool {
        self.drag.is_armed()
    }

    /// Write a value: clamp, update derived state, notify.
    pub fn set_value(&mut self, value: i64) -> SliderChanged {
        self.value = self.range.clamp(value);
        self.percent = self.range.percent(self.value);
        self.drag.sync(&self.range, self.value);
        log::trace!("{:?} value <- {} ({:.1}%)", self.widget_id, self.value, self.percent);

        let message = SliderChanged {
            slider: self.widget_id,
            name: self.name.clone(),
            value: self.value,
            percent: self.percent,
        };
        self.notifier.notify(&message);
        message
    }

    /// Decrease by one step, saturating at `min`.
    pub fn step_left(&mut self) -> SliderChanged {
        self.set_value(self.value.saturating_sub(self.range.step()))
    }

    /// Increase by one step, saturating at `max`.
    pub fn step_right(&mut self) -> SliderChanged {
        self.set_value(self.value.saturating_add(self.range.step()))
    }

    /// Snapshot for rendering.
    #[must_use]
    pub const fn bar(&self) -> BarRender {
        BarRender {
            min: self.range.min(),
            max: self.range.max(),
            position: self.value,
            mode: self.display,
        }
    }

    /// Render the bar line at `width` cells.
    #[must_use]
    pub fn render_line(&self, width: usize) -> String {
        self.bar().render(width)
    }

    /// Bounds minus padding.
    #[must_use]
    pub const fn content_rect(&self) -> Rect {
        self.bounds
            .inset_horizontal(self.padding_left, self.padding_right)
    }

    /// Bar layout for the current content width and value.
    #[must_use]
    pub fn geometry(&self) -> BarGeometry {
        BarGeometry::new(self.content_rect().width, &self.bar())
    }

    /// Press at a widget-local position.
    ///
    /// Presses off the bar body, or outside the widget's row, do nothing.
    pub fn pointer_down(&mut self, position: Point, screen: Point) -> Option<SliderChanged> {
        if position.y < 0 || position.y >= i32::from(self.bounds.height.max(1)) {
            return None;
        }
        let local_x = position.x - i32::from(self.padding_left);
        let geometry = self.geometry();
        let value = self
            .drag
            .pointer_down(&self.range, &geometry, local_x, screen.x)?;
        Some(self.set_value(value))
    }

    /// Pointer motion while grabbed. The pointer may be anywhere.
    pub fn pointer_move(&mut self, screen: Point) -> Option<SliderChanged> {
        let geometry = self.geometry();
        let value = self.drag.pointer_move(&self.range, &geometry, screen.x)?;
        Some(self.set_value(value))
    }

    /// End any drag in progress.
    pub fn release(&mut self) {
        self.drag.release(&self.range, self.value);
    }
}

fn boxed(message: Option<SliderChanged>) -> Option<Box<dyn Any + Send>> {
    message.map(|m| Box::new(m) as Box<dyn Any + Send>)
}

impl Widget for ThinSlider {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        // Fill the row, one line tall.
        constraints.constrain(Size::new(constraints.max_width, 1))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let content = self.content_rect();
        if content.height == 0 {
            return;
        }
        canvas.draw_text(
            &self.render_line(usize::from(content.width)),
            content.origin(),
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseUp { .. } | Event::CaptureLost => {
                self.release();
                None
            }
            _ if self.disabled => None,
            Event::MouseDown {
                position,
                screen,
                button: MouseButton::Left,
            } => boxed(self.pointer_down(*position, *screen)),
            Event::MouseMove { screen, .. } => boxed(self.pointer_move(*screen)),
            Event::KeyDown { key: Key::Left } => boxed(Some(self.step_left())),
            Event::KeyDown { key: Key::Right } => boxed(Some(self.step_right())),
            _ => None,
        }
    }

    fn has_capture(&self) -> bool {
        self.is_grabbed()
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn test_id(&self) -> Option<&str> {
        self.name()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::Receiver;
    use thinslider_core::{DrawCommand, RecordingCanvas};

    fn slider(min: i64, max: i64) -> ThinSlider {
        ThinSlider::new(RangeModel::new(min, max, 1).unwrap())
    }

    fn laid_out(mut s: ThinSlider, width: u16) -> ThinSlider {
        s.layout(Rect::new(0, 0, width, 1));
        s
    }

    fn down(x: i32) -> Event {
        Event::MouseDown {
            position: Point::new(x, 0),
            screen: Point::new(x, 0),
            button: MouseButton::Left,
        }
    }

    fn moved(x: i32) -> Event {
        Event::MouseMove {
            position: Point::new(x, 0),
            screen: Point::new(x, 0),
        }
    }

    fn up(x: i32) -> Event {
        Event::MouseUp {
            position: Point::new(x, 0),
            screen: Point::new(x, 0),
            button: MouseButton::Left,
        }
    }

    fn changed(msg: Option<Box<dyn Any + Send>>) -> SliderChanged {
        *msg.expect("expected a message")
            .downcast::<SliderChanged>()
            .expect("expected SliderChanged")
    }

    fn drain(rx: &Receiver<SliderChanged>) -> Vec<i64> {
        rx.try_iter().map(|m| m.value).collect()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_starts_at_min() {
        let s = slider(72, 325);
        assert_eq!(s.get_value(), 72);
        assert_eq!(s.percent(), 0.0);
        assert!(!s.is_grabbed());
    }

    #[test]
    fn test_builder_value_clamps_without_notifying() {
        let (notifier, rx) = ChangeNotifier::channel();
        let s = slider(0, 100).with_notifier(notifier).value(250);
        assert_eq!(s.get_value(), 100);
        assert_eq!(s.percent(), 100.0);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = SliderConfig {
            id: Some("volume".to_string()),
            min: 0,
            max: 1500,
            step: 3,
            value: Some(600),
            display: DisplayMode::PositionRight,
        };
        let s = ThinSlider::from_config(&config).unwrap();
        assert_eq!(s.get_value(), 600);
        assert_eq!(s.range().step(), 3);
        assert_eq!(s.display_mode(), DisplayMode::PositionRight);
        assert_eq!(s.name(), Some("volume"));
        assert_eq!(Widget::test_id(&s), Some("volume"));
    }

    #[test]
    fn test_from_config_rejects_bad_range() {
        let config = SliderConfig::new(10, 0);
        assert_eq!(
            ThinSlider::from_config(&config).unwrap_err(),
            ConfigError::InvertedRange { min: 10, max: 0 }
        );
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: SliderConfig = serde_json::from_str(r#"{"min": 0, "max": 250}"#).unwrap();
        assert_eq!(config, SliderConfig::new(0, 250));
    }

    #[test]
    fn test_widget_ids_are_unique() {
        assert_ne!(slider(0, 1).widget_id(), slider(0, 1).widget_id());
    }

    // =========================================================================
    // Value writes and notifications
    // =========================================================================

    #[test]
    fn test_set_value_clamps_and_notifies() {
        let (notifier, rx) = ChangeNotifier::channel();
        let mut s = slider(0, 100).with_id("s").with_notifier(notifier);

        let msg = s.set_value(140);
        assert_eq!(msg.value, 100);
        assert_eq!(msg.percent, 100.0);
        assert_eq!(msg.name.as_deref(), Some("s"));
        assert_eq!(msg.slider, s.widget_id());
        assert_eq!(drain(&rx), vec![100]);
    }

    #[test]
    fn test_steps_saturate_and_still_notify() {
        let (notifier, rx) = ChangeNotifier::channel();
        let mut s = slider(0, 100).with_notifier(notifier);

        s.step_right();
        s.step_left();
        s.step_left();
        s.step_left();

        assert_eq!(s.get_value(), 0);
        assert_eq!(drain(&rx), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_step_size_applies() {
        let mut s = ThinSlider::new(RangeModel::new(0, 10, 3).unwrap());
        s.step_right();
        s.step_right();
        s.step_right();
        assert_eq!(s.get_value(), 9);
        s.step_right();
        assert_eq!(s.get_value(), 10);
        s.step_left();
        assert_eq!(s.get_value(), 7);
    }

    #[test]
    fn test_set_value_resyncs_virtual_position() {
        let mut s = slider(0, 79);
        s.set_value(40);
        assert_eq!(s.virtual_position(), 50.0);
    }

    // =========================================================================
    // Pointer interaction
    // =========================================================================

    #[test]
    fn test_press_drag_release() {
        let mut s = laid_out(slider(0, 79), 10);

        assert_eq!(changed(s.event(&down(1))).value, 10);
        assert!(s.has_capture());
        assert_eq!(changed(s.event(&moved(4))).value, 40);
        assert!(s.event(&up(4)).is_none());
        assert!(!s.has_capture());
        assert_eq!(s.get_value(), 40);

        assert_eq!(changed(s.event(&down(2))).value, 20);
        s.event(&up(2));
        assert_eq!(s.get_value(), 20);
    }

    #[test]
    fn test_press_on_brackets_ignored() {
        let (notifier, rx) = ChangeNotifier::channel();
        let mut s = laid_out(slider(0, 79).with_notifier(notifier), 10);

        assert!(s.event(&down(0)).is_none());
        assert!(s.event(&down(9)).is_none());
        assert!(s.event(&down(10)).is_none());
        assert!(!s.has_capture());
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_press_off_row_ignored() {
        let mut s = laid_out(slider(0, 79), 10);
        let e = Event::MouseDown {
            position: Point::new(1, 1),
            screen: Point::new(1, 1),
            button: MouseButton::Left,
        };
        assert!(s.event(&e).is_none());
        assert_eq!(s.get_value(), 0);
    }

    #[test]
    fn test_right_button_does_not_grab() {
        let mut s = laid_out(slider(0, 79), 10);
        let e = Event::MouseDown {
            position: Point::new(3, 0),
            screen: Point::new(3, 0),
            button: MouseButton::Right,
        };
        assert!(s.event(&e).is_none());
        assert!(!s.has_capture());
    }

    #[test]
    fn test_press_respects_padding() {
        let mut s = laid_out(slider(0, 79).padding(2, 0), 12);
        // Column 2 is the opening bracket once padding is removed.
        assert!(s.event(&down(2)).is_none());
        assert_eq!(changed(s.event(&down(3))).value, 10);
    }

    #[test]
    fn test_press_with_left_label() {
        let mut s = laid_out(slider(0, 100).display(DisplayMode::PercentLeft), 20);
        assert!(s.event(&down(4)).is_none());
        assert!(changed(s.event(&down(5))).value < 10);
    }

    #[test]
    fn test_capture_lost_releases() {
        let mut s = laid_out(slider(0, 79), 10);
        s.event(&down(1));
        s.event(&Event::CaptureLost);
        assert!(!s.has_capture());
        assert!(s.event(&moved(8)).is_none());
    }

    #[test]
    fn test_move_without_grab_ignored() {
        let mut s = laid_out(slider(0, 79), 10);
        assert!(s.event(&moved(5)).is_none());
        assert_eq!(s.get_value(), 0);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut s = laid_out(slider(0, 79).disabled(true), 10);
        assert!(s.event(&down(3)).is_none());
        assert!(s.event(&Event::KeyDown { key: Key::Right }).is_none());
        assert!(!s.is_focusable());
        assert!(!s.is_interactive());
    }

    #[test]
    fn test_keyboard_events() {
        let mut s = laid_out(slider(0, 79), 10);
        assert_eq!(changed(s.event(&Event::KeyDown { key: Key::Right })).value, 1);
        assert_eq!(changed(s.event(&Event::KeyDown { key: Key::Left })).value, 0);
        assert!(s.event(&Event::KeyDown { key: Key::Up }).is_none());
    }

    // =========================================================================
    // Widget trait
    // =========================================================================

    #[test]
    fn test_measure_fills_row() {
        let s = slider(0, 100);
        let size = s.measure(Constraints::loose(Size::new(80, 24)));
        assert_eq!(size, Size::new(80, 1));
    }

    #[test]
    fn test_paint_draws_line_at_content_origin() {
        let mut s = slider(0, 100).value(50).display(DisplayMode::PercentLeft).padding(1, 1);
        s.layout(Rect::new(3, 2, 22, 1));

        let mut canvas = RecordingCanvas::new();
        s.paint(&mut canvas);

        assert_eq!(
            canvas.commands(),
            &[DrawCommand::Text {
                text: " 50%[███████       ]".to_string(),
                position: Point::new(4, 2),
            }]
        );
    }

    #[test]
    fn test_accessibility() {
        let s = slider(0, 1).with_accessible_name("Volume");
        assert_eq!(s.accessible_role(), AccessibleRole::Slider);
        assert_eq!(s.accessible_name(), Some("Volume"));
        assert!(s.is_focusable());
    }
}
