pub mod buffer;
pub mod graphics;

pub use buffer::TextBuffer;
pub use graphics::GraphicsSurface;

/// Foreground/background pairing applied to subsequent text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextStyle {
    #[default]
    Normal,
    Inverted,
}

/// Display geometry and timing constants consumed by the text-entry widget.
///
/// Passed explicitly at construction time instead of living as module-level
/// constants, so one binary can drive differently sized panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayGeometry {
    /// Drawable width in pixels.
    pub display_width: usize,
    /// Width of one character cell in pixels.
    pub char_width: usize,
    /// Number of draw passes between cursor visibility toggles.
    pub blink_interval: u8,
}

impl DisplayGeometry {
    /// Total character columns available on one line.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.display_width / self.char_width.max(1)
    }
}

impl Default for DisplayGeometry {
    /// 128 px panel with 6 px cells, blink every 5 frames.
    fn default() -> Self {
        Self {
            display_width: 128,
            char_width: 6,
            blink_interval: 5,
        }
    }
}

/// Character-oriented rendering capability supplied by a display driver.
///
/// The menu core never touches pixels directly; pages and items issue
/// cursor positioning, styled prints and a final [`flush`](Surface::flush)
/// through this seam. Errors use the surface's own error type and are
/// propagated unchanged to the draw caller.
pub trait Surface {
    type Error;

    /// Wipe the frame and home the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to a character cell (column, row), origin top-left.
    fn set_cursor(&mut self, column: usize, row: usize);

    /// Select the text scale. Surfaces may only support size 1.
    fn set_text_size(&mut self, size: u8);

    /// Enable or disable wrapping of text past the right edge.
    fn set_wrap(&mut self, wrap: bool);

    /// Style applied to subsequent prints.
    fn set_style(&mut self, style: TextStyle);

    /// Print without a trailing newline.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Print and advance to the start of the next line.
    fn println(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Print a single character.
    fn print_char(&mut self, ch: char) -> Result<(), Self::Error> {
        let mut encoded = [0_u8; 4];
        self.print(ch.encode_utf8(&mut encoded))
    }

    /// Commit the frame to the physical display.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
