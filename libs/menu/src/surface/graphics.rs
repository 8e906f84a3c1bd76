use embedded_graphics::{
    Drawable,
    mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use super::{Surface, TextStyle};

/// Character-cell console over any monochrome [`DrawTarget`].
///
/// Tracks a text cursor in pixels and renders mono-font glyphs with an
/// explicit background colour, so inverted text paints a filled cell.
/// Committing the finished frame to the panel (an e-paper refresh, an OLED
/// page write) stays with the display driver, so `flush` is a no-op here.
pub struct GraphicsSurface<D> {
    target: D,
    font: &'static MonoFont<'static>,
    cursor: Point,
    style: TextStyle,
    wrap: bool,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    #[must_use]
    pub fn new(target: D) -> Self {
        Self::with_font(target, &FONT_6X10)
    }

    #[must_use]
    pub fn with_font(target: D, font: &'static MonoFont<'static>) -> Self {
        Self {
            target,
            font,
            cursor: Point::zero(),
            style: TextStyle::Normal,
            wrap: false,
        }
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn char_style(&self) -> MonoTextStyle<'static, BinaryColor> {
        let builder = MonoTextStyleBuilder::new().font(self.font);
        match self.style {
            TextStyle::Normal => builder
                .text_color(BinaryColor::On)
                .background_color(BinaryColor::Off),
            TextStyle::Inverted => builder
                .text_color(BinaryColor::Off)
                .background_color(BinaryColor::On),
        }
        .build()
    }

    fn line_feed(&mut self) {
        self.cursor = Point::new(
            0,
            self.cursor.y + self.font.character_size.height.cast_signed(),
        );
    }

    /// Whole character cells left between the cursor and the right edge.
    fn columns_remaining(&self) -> usize {
        let width = self.target.bounding_box().size.width.cast_signed();
        let cell = self.font.character_size.width.cast_signed().max(1);
        usize::try_from((width - self.cursor.x) / cell).unwrap_or(0)
    }
}

impl<D> Surface for GraphicsSurface<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.cursor = Point::zero();
        self.target.clear(BinaryColor::Off)
    }

    fn set_cursor(&mut self, column: usize, row: usize) {
        let cell = self.font.character_size;
        self.cursor = Point::new(
            cell.width
                .cast_signed()
                .saturating_mul(i32::try_from(column).unwrap_or(i32::MAX)),
            cell.height
                .cast_signed()
                .saturating_mul(i32::try_from(row).unwrap_or(i32::MAX)),
        );
    }

    fn set_text_size(&mut self, size: u8) {
        // Mono fonts do not scale; the menu only ever requests size 1.
        if size != 1 {
            log::debug!("text size {size} unsupported, staying at 1");
        }
    }

    fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    fn set_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        let style = self.char_style();

        if !self.wrap {
            self.cursor =
                Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.target)?;
            return Ok(());
        }

        let mut rest = text;
        while !rest.is_empty() {
            let fit = self.columns_remaining();
            if fit == 0 {
                if self.cursor.x == 0 {
                    // Degenerate target narrower than one cell
                    break;
                }
                self.line_feed();
                continue;
            }
            let split = rest
                .char_indices()
                .nth(fit)
                .map_or(rest.len(), |(idx, _)| idx);
            let (head, tail) = rest.split_at(split);
            self.cursor =
                Text::with_baseline(head, self.cursor, style, Baseline::Top).draw(&mut self.target)?;
            rest = tail;
            if !rest.is_empty() {
                self.line_feed();
            }
        }
        Ok(())
    }

    fn println(&mut self, text: &str) -> Result<(), Self::Error> {
        self.print(text)?;
        self.line_feed();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
