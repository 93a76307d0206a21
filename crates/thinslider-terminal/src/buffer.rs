//! Character grid the app paints into before flushing to the terminal.

use thinslider_core::{Canvas, Point, Rect};
use unicode_width::UnicodeWidthChar;

/// A single terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The symbol displayed in this cell.
    pub symbol: char,
    /// Display width of the symbol (1 for normal, 2 for wide chars, 0 for continuation).
    width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            width: 1,
        }
    }
}

impl Cell {
    /// Check if this is the trailing half of a wide character.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Get the display width of this cell.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }
}

/// Fixed-size grid of cells implementing [`Canvas`].
///
/// Drawing is clipped to the grid.
#[derive(Debug, Clone)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl CellBuffer {
    /// Create a blank buffer with the given dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::default(); size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    /// Get a cell reference.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    fn put(&mut self, x: i32, y: i32, symbol: char, width: u8) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = Cell { symbol, width };
        }
    }

    /// Text of one row, wide characters counted once.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + usize::from(self.width)]
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.symbol)
            .collect()
    }

    /// All rows as text.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }
}

impl Canvas for CellBuffer {
    fn draw_text(&mut self, text: &str, position: Point) {
        let mut x = position.x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            // A wide char that would straddle the right edge is dropped.
            if x + width as i32 > i32::from(self.width) {
                break;
            }
            if x >= 0 {
                self.put(x, position.y, ch, width as u8);
                if width == 2 {
                    self.put(x + 1, position.y, ' ', 0);
                }
            } else if width == 2 {
                // Right half of a wide char cut by the left edge.
                self.put(x + 1, position.y, ' ', 1);
            }
            x += width as i32;
        }
    }

    fn fill(&mut self, rect: Rect, ch: char) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.put(x, y, ch, 1);
            }
        }
    }
}
