//! Thin block-glyph range slider.
//!
//! - [`range`]: validated integer range and step/percent/virtual arithmetic
//! - [`bar`]: pure bar-line renderer with eighth-cell resolution
//! - [`drag`]: pointer press/drag state machine
//! - [`notify`]: value-changed notifications
//! - [`slider`]: the [`ThinSlider`] widget tying them together

pub mod bar;
pub mod drag;
mod error;
pub mod notify;
pub mod range;
pub mod slider;

pub use bar::{
    label_width, render_bar, BarRender, DisplayMode, LabelContent, LabelSide, BLANK_GLYPH,
    PARTIAL_GLYPHS, SOLID_GLYPH,
};
pub use drag::{BarGeometry, DragController, GrabState};
pub use error::ConfigError;
pub use notify::{ChangeNotifier, SliderChanged};
pub use range::RangeModel;
pub use slider::{SliderConfig, ThinSlider};
