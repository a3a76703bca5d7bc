use std::path::Path;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use tracing::debug;

use super::{display_name, StatusRenderer, TableLayout};
use crate::battlefield::Roster;
use crate::config::RenderConfig;
use crate::error::{WarbotError, WarbotResult};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const ALIVE_INK: Rgb<u8> = Rgb([0, 0, 0]);
const DEAD_INK: Rgb<u8> = Rgb([255, 0, 0]);

const GLYPH_SIZE: u32 = 8;

/// Raster renderer drawing the table with 8x8 bitmap glyphs
#[derive(Debug, Clone)]
pub struct TableRenderer {
    config: RenderConfig,
}

impl TableRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Draw the table into an in-memory image
    pub fn draw(&self, roster: &Roster) -> WarbotResult<RgbImage> {
        let layout = TableLayout::for_len(roster.len());
        let width = self.config.column_width.checked_mul(layout.columns as u32);
        let height = self.config.row_height.checked_mul(layout.rows as u32);
        let (Some(width), Some(height)) = (width, height) else {
            return Err(WarbotError::Render {
                message: format!("Table of {} columns x {} rows is too large", layout.columns, layout.rows),
            });
        };

        let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

        for (index, participant) in roster.participants().iter().enumerate() {
            let (column, row) = layout.cell(index);
            let x = column as u32 * self.config.column_width;
            let y = row as u32 * self.config.row_height;
            let ink = if participant.is_alive() { ALIVE_INK } else { DEAD_INK };

            let text_width = self.draw_text(&mut img, x, y, &display_name(participant.name()), ink);
            if !participant.is_alive() {
                self.strike_through(&mut img, x, y, text_width, ink);
            }
        }

        Ok(img)
    }

    fn glyph_px(&self) -> u32 {
        GLYPH_SIZE.saturating_mul(self.config.glyph_scale)
    }

    /// Top of the glyph box, vertically centered in the row
    fn baseline_top(&self, row_y: u32) -> u32 {
        row_y.saturating_add(self.config.row_height.saturating_sub(self.glyph_px()) / 2)
    }

    /// Draw text clipped to its column. Returns the drawn width in pixels.
    fn draw_text(&self, img: &mut RgbImage, x: u32, y: u32, text: &str, ink: Rgb<u8>) -> u32 {
        let scale = self.config.glyph_scale;
        let advance = self.glyph_px();
        let column_end = x.saturating_add(self.config.column_width).min(img.width());
        let top = self.baseline_top(y);
        let mut cursor = x;

        for c in text.chars() {
            if cursor.saturating_add(advance) > column_end {
                break;
            }

            let glyph = glyph_for(c);
            for (gy, bits) in glyph.iter().enumerate() {
                for gx in 0..GLYPH_SIZE {
                    if bits & (1 << gx) == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = cursor + gx * scale + dx;
                            let py = top + gy as u32 * scale + dy;
                            if px < img.width() && py < img.height() {
                                img.put_pixel(px, py, ink);
                            }
                        }
                    }
                }
            }
            cursor += advance;
        }

        cursor - x
    }

    fn strike_through(&self, img: &mut RgbImage, x: u32, y: u32, width: u32, ink: Rgb<u8>) {
        if width == 0 {
            return;
        }

        let scale = self.config.glyph_scale;
        let line_top = self
            .baseline_top(y)
            .saturating_add((GLYPH_SIZE / 2 - 1).saturating_mul(scale));

        for py in line_top..line_top.saturating_add(scale.max(1)) {
            for px in x..x.saturating_add(width) {
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, ink);
                }
            }
        }
    }
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl StatusRenderer for TableRenderer {
    fn extension(&self) -> &str {
        self.config.format.extension()
    }

    fn render(&self, roster: &Roster, output: &Path) -> WarbotResult<()> {
        let img = self.draw(roster)?;
        img.save_with_format(output, self.config.format.into())?;

        debug!(
            path = %output.display(),
            width = img.width(),
            height = img.height(),
            "Rendered status table"
        );
        Ok(())
    }
}

fn glyph_for(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
