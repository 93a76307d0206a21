//! Block-glyph bar rendering.
//!
//! A bar line has the shape `[label]?` `[` cells `]` `[label]?` and is
//! exactly `width` cells wide. The filled portion uses solid blocks, and the
//! cell containing the boundary uses one of eight partial glyphs so the bar
//! resolves an eighth of a cell.
//!
//! ```
//! use thinslider_widgets::{render_bar, DisplayMode};
//!
//! assert_eq!(render_bar(0, 100, 20, 50, DisplayMode::PercentLeft), " 50%[███████       ]");
//! assert_eq!(render_bar(0, 100, 20, 50, DisplayMode::PositionRight), "[███████▌       ] 50");
//! ```

use serde::{Deserialize, Serialize};

/// Fully filled cell.
pub const SOLID_GLYPH: char = '█';

/// Empty cell.
pub const BLANK_GLYPH: char = ' ';

/// Partial fills, densest first. The last entry is an empty cell.
pub const PARTIAL_GLYPHS: [char; 8] = ['▉', '▊', '▋', '▌', '▍', '▎', '▏', ' '];

/// Width of the `[` and `]` boundary glyphs together.
const BRACKETS: usize = 2;

/// Which side of the bar the label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelSide {
    /// Before the opening bracket
    Left,
    /// After the closing bracket
    Right,
}

/// What the label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelContent {
    /// `" 42%"`, always four cells
    Percent,
    /// The value, right-justified to the width of `max`
    Position,
}

/// How the value is shown alongside the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Bar only
    #[default]
    None,
    /// Percentage before the bar
    PercentLeft,
    /// Percentage after the bar
    PercentRight,
    /// Value before the bar
    PositionLeft,
    /// Value after the bar
    PositionRight,
}

impl DisplayMode {
    /// Side the label sits on, or `None` when no label is drawn.
    #[must_use]
    pub const fn side(self) -> Option<LabelSide> {
        match self {
            Self::None => None,
            Self::PercentLeft | Self::PositionLeft => Some(LabelSide::Left),
            Self::PercentRight | Self::PositionRight => Some(LabelSide::Right),
        }
    }

    /// Label content, or `None` when no label is drawn.
    #[must_use]
    pub const fn content(self) -> Option<LabelContent> {
        match self {
            Self::None => None,
            Self::PercentLeft | Self::PercentRight => Some(LabelContent::Percent),
            Self::PositionLeft | Self::PositionRight => Some(LabelContent::Position),
        }
    }
}

/// Cells the label of `mode` takes when drawn at `position`.
///
/// Position labels are justified to the width of `max`, so a value with
/// more digits than `max` (a negative one, usually) widens the label.
#[must_use]
pub fn label_width(min: i64, max: i64, position: i64, mode: DisplayMode) -> usize {
    label_text(min, max, position, mode).chars().count()
}

/// `(offset, span)` of `position` within `[min, max]`, without overflow.
fn offset_and_span(min: i64, max: i64, position: i64) -> (f64, f64) {
    let offset = i128::from(position) - i128::from(min);
    let span = i128::from(max) - i128::from(min);
    (offset as f64, span as f64)
}

fn label_text(min: i64, max: i64, position: i64, mode: DisplayMode) -> String {
    match mode.content() {
        None => String::new(),
        Some(LabelContent::Percent) => {
            if position == max {
                "100%".to_string()
            } else {
                let (offset, span) = offset_and_span(min, max, position);
                let pct = (offset / span * 100.0).round_ties_even();
                format!("{:>3}%", pct as i64)
            }
        }
        Some(LabelContent::Position) => {
            format!("{position:>width$}", width = max.to_string().chars().count())
        }
    }
}

/// Glyph for the boundary cell, given how far into the cell the value reaches.
fn partial_glyph(fraction: f64) -> char {
    let top = PARTIAL_GLYPHS.len() - 1;
    let level = (PARTIAL_GLYPHS.len() as f64 * fraction)
        .round_ties_even()
        .clamp(0.0, top as f64) as usize;
    PARTIAL_GLYPHS[top - level]
}

fn bar_body(min: i64, max: i64, cells: usize, position: i64) -> String {
    if cells == 0 {
        return String::new();
    }
    if position >= max {
        return std::iter::repeat(SOLID_GLYPH).take(cells).collect();
    }

    let (offset, span) = offset_and_span(min, max, position);
    let step_size = span / cells as f64;
    let full = ((offset / step_size).max(0.0) as usize).min(cells);

    (0..cells)
        .map(|i| match i.cmp(&full) {
            std::cmp::Ordering::Less => SOLID_GLYPH,
            std::cmp::Ordering::Equal => partial_glyph((offset - i as f64 * step_size) / step_size),
            std::cmp::Ordering::Greater => BLANK_GLYPH,
        })
        .collect()
}

/// Render one bar line exactly `width` cells wide.
///
/// `position` is clamped into `[min, max]`. When `width` cannot hold the
/// label and both brackets, the bar body is empty and the line is cut to
/// `width` characters. A range with `max <= min` renders as full.
#[must_use]
pub fn render_bar(min: i64, max: i64, width: usize, position: i64, mode: DisplayMode) -> String {
    let position = if max <= min {
        max
    } else {
        position.clamp(min, max)
    };

    let label = label_text(min, max, position, mode);
    let cells = width.saturating_sub(label.chars().count() + BRACKETS);
    let body = bar_body(min, max, cells, position);

    let line = match mode.side() {
        Some(LabelSide::Left) => format!("{label}[{body}]"),
        Some(LabelSide::Right) => format!("[{body}]{label}"),
        None => format!("[{body}]"),
    };

    if line.chars().count() > width {
        line.chars().take(width).collect()
    } else {
        line
    }
}

/// A renderable bar snapshot: everything but the width, which the host
/// supplies at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRender {
    /// Lower bound
    pub min: i64,
    /// Upper bound
    pub max: i64,
    /// Current position
    pub position: i64,
    /// Label mode
    pub mode: DisplayMode,
}

impl BarRender {
    /// Render at the given width.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        render_bar(self.min, self.max, width, self.position, self.mode)
    }

    /// Cells taken by the label at the current position.
    #[must_use]
    pub fn label_width(&self) -> usize {
        label_width(self.min, self.max, self.position, self.mode)
    }
}
