use super::{Surface, TextStyle};

/// One rendered character cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub inverted: bool,
}

impl Cell {
    const BLANK: Self = Self {
        glyph: ' ',
        inverted: false,
    };
}

/// Headless character-grid surface.
///
/// Records every printed glyph together with its inversion flag, which makes
/// it the rendering backend for unit tests and for terminal front-ends.
/// Text past the right edge is clipped unless wrapping is enabled; text past
/// the bottom row is always clipped.
pub struct TextBuffer {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    cursor_col: usize,
    cursor_row: usize,
    style: TextStyle,
    wrap: bool,
    flushes: u32,
}

impl TextBuffer {
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::BLANK; columns * rows],
            cursor_col: 0,
            cursor_row: 0,
            style: TextStyle::Normal,
            wrap: false,
            flushes: 0,
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Frames committed so far.
    #[must_use]
    pub fn flushes(&self) -> u32 {
        self.flushes
    }

    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column]
        } else {
            Cell::BLANK
        }
    }

    /// Glyphs of one row with trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        let line: String = self.cells[row * self.columns..(row + 1) * self.columns]
            .iter()
            .map(|cell| cell.glyph)
            .collect();
        line.trim_end().to_string()
    }

    fn put(&mut self, ch: char) {
        if self.cursor_col >= self.columns {
            if !self.wrap {
                return; // clipped
            }
            self.cursor_col = 0;
            self.cursor_row += 1;
        }
        if self.cursor_row >= self.rows {
            return; // clipped
        }
        self.cells[self.cursor_row * self.columns + self.cursor_col] = Cell {
            glyph: ch,
            inverted: self.style == TextStyle::Inverted,
        };
        self.cursor_col += 1;
    }
}

impl Surface for TextBuffer {
    type Error = core::convert::Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.cells.fill(Cell::BLANK);
        self.cursor_col = 0;
        self.cursor_row = 0;
        Ok(())
    }

    fn set_cursor(&mut self, column: usize, row: usize) {
        self.cursor_col = column;
        self.cursor_row = row;
    }

    fn set_text_size(&mut self, _size: u8) {}

    fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        for ch in text.chars() {
            self.put(ch);
        }
        Ok(())
    }

    fn println(&mut self, text: &str) -> Result<(), Self::Error> {
        self.print(text)?;
        self.cursor_col = 0;
        self.cursor_row += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}
