//! Canvas that records draw commands for inspection.

use crate::geometry::{Point, Rect};
use crate::widget::Canvas;

/// A single recorded paint operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Text drawn at a cell
    Text {
        /// Text content
        text: String,
        /// Cell of the first character
        position: Point,
    },
    /// Rectangle filled with one character
    Fill {
        /// Filled area
        rect: Rect,
        /// Fill character
        ch: char,
    },
}

/// A canvas that records draw commands instead of rendering them.
///
/// Used by widget tests and by hosts that replay commands elsewhere.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Fill { .. } => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn draw_text(&mut self, text: &str, position: Point) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
        });
    }

    fn fill(&mut self, rect: Rect, ch: char) {
        self.commands.push(DrawCommand::Fill { rect, ch });
    }
}
