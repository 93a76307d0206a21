//! Pointer drag state machine.
//!
//! A press on the bar body arms the controller and jumps the value under the
//! pointer. While armed, horizontal motion moves a continuous virtual
//! position which is quantized to the step grid on every move, so a drag
//! never fights the rounding of the previous update. Release disarms.
//!
//! The controller never writes the value itself: operations return the
//! value the owner should store.

use crate::bar::{BarRender, LabelSide};
use crate::range::RangeModel;

/// Horizontal layout of a bar line inside its content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    /// Content width in cells (padding excluded)
    pub content_width: u16,
    /// Cells taken by the label
    pub label_width: usize,
    /// Side the label is on
    pub label_side: Option<LabelSide>,
}

impl BarGeometry {
    /// Geometry of `bar` as drawn at `content_width`.
    ///
    /// The label is measured at the bar's current position, matching what
    /// [`BarRender::render`] draws.
    #[must_use]
    pub fn new(content_width: u16, bar: &BarRender) -> Self {
        Self {
            content_width,
            label_width: bar.label_width(),
            label_side: bar.mode.side(),
        }
    }

    /// Interactive columns as a half-open `[start, end)` pair.
    ///
    /// Excludes the label and both bracket glyphs.
    #[must_use]
    pub fn extent(&self) -> (i32, i32) {
        let width = i32::from(self.content_width);
        let label = self.label_width as i32;
        match self.label_side {
            Some(LabelSide::Left) => (label + 1, width - 1),
            Some(LabelSide::Right) => (1, width - label - 1),
            None => (1, width - 1),
        }
    }

    /// Number of interactive columns (zero when the bar has no body).
    #[must_use]
    pub fn cells(&self) -> i32 {
        let (start, end) = self.extent();
        (end - start).max(0)
    }

    /// Whether a local column falls on the bar body.
    #[must_use]
    pub fn contains(&self, x: i32) -> bool {
        let (start, end) = self.extent();
        start <= x && x < end
    }
}

/// Grab state of a [`DragController`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrabState {
    /// No drag in progress
    #[default]
    Idle,
    /// Pointer captured
    Armed {
        /// Screen column of the press
        origin_x: i32,
        /// Virtual position computed at the press
        virtual_at_grab: f64,
    },
}

/// Converts pointer presses and motion into quantized values.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: GrabState,
    virtual_pos: f64,
}

impl DragController {
    /// Create an idle controller whose virtual position mirrors `value`.
    #[must_use]
    pub fn new(range: &RangeModel, value: i64) -> Self {
        Self {
            state: GrabState::Idle,
            virtual_pos: range.virtual_from_value(value),
        }
    }

    /// Current grab state.
    #[must_use]
    pub const fn state(&self) -> GrabState {
        self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self.state, GrabState::Armed { .. })
    }

    /// Continuous position in virtual units.
    #[must_use]
    pub const fn virtual_position(&self) -> f64 {
        self.virtual_pos
    }

    /// Width of the notional thumb in bar cells, at least one.
    #[must_use]
    pub fn thumb_width(range: &RangeModel, cells: i32) -> f64 {
        let step_ratio = (100.0 / range.total_steps() as f64).ceil();
        (step_ratio / (100.0 / f64::from(cells))).max(1.0)
    }

    /// Handle a press at local column `local_x` (padding already removed).
    ///
    /// Returns the value to store, or `None` when the press missed the bar
    /// body, in which case nothing changes.
    pub fn pointer_down(
        &mut self,
        range: &RangeModel,
        geometry: &BarGeometry,
        local_x: i32,
        screen_x: i32,
    ) -> Option<i64> {
        if !geometry.contains(local_x) {
            log::debug!("press at column {local_x} outside bar extent {:?}", geometry.extent());
            return None;
        }

        let (start, _) = geometry.extent();
        let cells = f64::from(geometry.cells());
        let thumb = Self::thumb_width(range, geometry.cells());
        let offset = (local_x - (start - 1)).max(0);

        self.virtual_pos = ((f64::from(offset) - (thumb / 2.0).floor()) / cells) * 100.0;
        self.state = GrabState::Armed {
            origin_x: screen_x,
            virtual_at_grab: self.virtual_pos,
        };
        log::debug!("grabbed at screen column {screen_x}, virtual {:.3}", self.virtual_pos);

        Some(range.value_from_virtual(self.virtual_pos))
    }

    /// Handle motion to screen column `screen_x`.
    ///
    /// Ignored unless armed. The pointer may be anywhere on screen.
    pub fn pointer_move(
        &mut self,
        range: &RangeModel,
        geometry: &BarGeometry,
        screen_x: i32,
    ) -> Option<i64> {
        let GrabState::Armed {
            origin_x,
            virtual_at_grab,
        } = self.state
        else {
            return None;
        };
        let cells = geometry.cells();
        if cells == 0 {
            return None;
        }

        let moved = f64::from(screen_x - origin_x);
        self.virtual_pos =
            (virtual_at_grab + moved * (100.0 / f64::from(cells))).clamp(0.0, range.max_virtual());

        Some(range.value_from_virtual(self.virtual_pos))
    }

    /// End the drag. Safe to call when idle.
    pub fn release(&mut self, range: &RangeModel, value: i64) {
        if self.is_armed() {
            log::debug!("released grab at value {value}");
        }
        self.state = GrabState::Idle;
        self.sync(range, value);
    }

    /// Mirror an externally written value into the virtual position.
    ///
    /// No-op while armed; the drag owns the virtual position then.
    pub fn sync(&mut self, range: &RangeModel, value: i64) {
        if !self.is_armed() {
            self.virtual_pos = range.virtual_from_value(value);
        }
    }
}
