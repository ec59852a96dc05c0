use sdl2::pixels::Color;

/// Width in pixels of each glyph cell in the font sprite sheet.
pub const BITMAP_GLYPH_W: u32 = 6;

/// Height in pixels of the rendered portion of each glyph.
pub const BITMAP_GLYPH_H: u32 = 10;

/// Y-offset within the font sprite sheet where glyphs start.
pub const BITMAP_GLYPH_Y_OFFSET: i32 = 1;

/// Returns the advance width of a single glyph (rendered width is 5px, advance is 6px).
pub const BITMAP_GLYPH_ADVANCE: u32 = BITMAP_GLYPH_W;

/// Returns the 0-based glyph index for the given ASCII character.
///
/// Returns -1 for characters outside the printable range.
#[inline]
pub fn glyph_index(ch: char) -> i32 {
    let code = ch as i32;
    if !(32..=127).contains(&code) {
        return -1;
    }
    code - 32
}

/// Draws a text string onto `canvas` using the bitmap font sheet, tinted
/// with `color` via texture color modulation.
///
/// Each character advances `BITMAP_GLYPH_ADVANCE` pixels horizontally. A
/// missing font sheet is a no-op (the cache has already logged the failure).
pub fn draw_text(
    canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
    gfx_cache: &mut crate::gfx_cache::GraphicsCache,
    text: &str,
    x: i32,
    y: i32,
    color: Color,
) -> Result<(), String> {
    let sheet_path = crate::filepaths::get_font_sheet();

    let mut cx = x;
    for ch in text.chars() {
        let glyph = glyph_index(ch);
        if glyph < 0 {
            cx += BITMAP_GLYPH_ADVANCE as i32;
            continue;
        }

        // Re-fetch each iteration to avoid holding a reference across the `copy` call.
        let Some(texture) = gfx_cache.get_texture(&sheet_path) else {
            return Ok(());
        };
        texture.set_color_mod(color.r, color.g, color.b);

        let src = sdl2::rect::Rect::new(
            glyph * BITMAP_GLYPH_W as i32,
            BITMAP_GLYPH_Y_OFFSET,
            BITMAP_GLYPH_W - 1,
            BITMAP_GLYPH_H,
        );
        let dst = sdl2::rect::Rect::new(cx, y, BITMAP_GLYPH_W - 1, BITMAP_GLYPH_H);
        canvas.copy(texture, Some(src), Some(dst))?;

        cx += BITMAP_GLYPH_ADVANCE as i32;
    }

    Ok(())
}

/// Draws `text` centered horizontally around `center_x`.
pub fn draw_text_centered(
    canvas: &mut sdl2::render::Canvas<sdl2::video::Window>,
    gfx_cache: &mut crate::gfx_cache::GraphicsCache,
    text: &str,
    center_x: i32,
    y: i32,
    color: Color,
) -> Result<(), String> {
    let width = text_width(text) as i32;
    draw_text(canvas, gfx_cache, text, center_x - width / 2, y, color)
}

/// Returns the pixel width of the given text string when rendered with the bitmap font.
#[inline]
pub fn text_width(text: &str) -> u32 {
    (text.len() as u32) * BITMAP_GLYPH_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_index_space() {
        assert_eq!(glyph_index(' '), 0);
    }

    #[test]
    fn glyph_index_uppercase_a() {
        // 'A' = 65, 65 - 32 = 33
        assert_eq!(glyph_index('A'), 33);
    }

    #[test]
    fn glyph_index_non_printable() {
        assert_eq!(glyph_index('\t'), -1);
        assert_eq!(glyph_index('\n'), -1);
    }

    #[test]
    fn glyph_index_high_unicode() {
        assert_eq!(glyph_index('€'), -1);
    }

    #[test]
    fn text_width_empty() {
        assert_eq!(text_width(""), 0);
    }

    #[test]
    fn text_width_label() {
        assert_eq!(text_width("Swo"), 18); // 3 * 6
    }
}
