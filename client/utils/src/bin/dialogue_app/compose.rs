use std::fs;
use std::path::Path;

use anyhow::Context;
use image::{imageops, Rgba, RgbaImage};

use super::glyphs::GlyphSet;
use super::wrap::wrap_text_to_lines;

/// Ellipsis appended when a line is trimmed to fit the box.
const ELLIPSIS: &str = "...";

/// Rendering options for a dialogue image.
pub struct DialogueOptions {
    pub line_spacing: u32,
    pub bg_color: Option<Rgba<u8>>,
    /// When set, text wraps to this pixel width; otherwise only explicit
    /// newlines break lines.
    pub box_width: Option<u32>,
    /// When set, lines that do not fit this pixel height are dropped or
    /// ellipsized.
    pub box_height: Option<u32>,
}

impl Default for DialogueOptions {
    fn default() -> Self {
        Self {
            line_spacing: 8,
            bg_color: None,
            box_width: None,
            box_height: None,
        }
    }
}

/// Total pixel height of stacked lines including inter-line spacing.
fn stacked_height(images: &[RgbaImage], line_spacing: u32) -> u32 {
    let heights: u32 = images.iter().map(RgbaImage::height).sum();
    let gaps = images.len().saturating_sub(1) as u32;
    heights + line_spacing * gaps
}

/// Concatenates glyph images into one horizontal strip, bottom-aligned.
fn compose_strip(images: &[RgbaImage]) -> RgbaImage {
    let total_w: u32 = images.iter().map(RgbaImage::width).sum();
    let max_h = images.iter().map(RgbaImage::height).max().unwrap_or(0);

    let mut out = RgbaImage::new(total_w, max_h);
    let mut x: i64 = 0;
    for img in images {
        let y = (max_h - img.height()) as i64;
        imageops::overlay(&mut out, img, x, y);
        x += img.width() as i64;
    }
    out
}

/// Composes a single line of text (no newlines) into an image.
///
/// Unknown characters are skipped; spaces with no glyph become transparent
/// `space_width × 1` spacers. An empty result yields a minimal transparent
/// image so callers never deal with zero-line output.
pub fn compose_string(set: &GlyphSet, s: &str) -> RgbaImage {
    let mut images: Vec<RgbaImage> = Vec::new();
    let mut quote_open = false;

    for ch in s.chars() {
        match set.image_for_char(ch, &mut quote_open) {
            Some(img) => images.push(img.clone()),
            None if ch == ' ' => images.push(RgbaImage::new(set.space_width(), 1)),
            None => {}
        }
    }

    if images.is_empty() {
        return RgbaImage::new(set.space_width(), 1);
    }
    compose_strip(&images)
}

/// Shortens `base` from the end until `<trimmed>...` fits `box_width`,
/// returning the trimmed string; a lone ellipsis when nothing fits.
fn ellipsize(set: &GlyphSet, base: &str, box_width: Option<u32>, ell_w: u32) -> String {
    let mut cur = base.to_string();
    loop {
        if cur.is_empty() {
            return ELLIPSIS.to_string();
        }
        cur.pop();
        let cur_w = compose_string(set, &cur).width();
        if box_width.map_or(true, |bw| cur_w + ell_w <= bw) {
            return format!("{}{}", cur, ELLIPSIS);
        }
    }
}

/// Renders wrapped, box-fitted dialogue text into an RGBA image.
///
/// Lines are stacked top to bottom with `line_spacing` between them, each
/// centered within the widest line. When the stack exceeds `box_height`,
/// trailing lines are dropped while more than one remains; a lone
/// overflowing line is ellipsized to `box_width` instead.
pub fn render_dialogue(text: &str, set: &GlyphSet, opts: &DialogueOptions) -> RgbaImage {
    let lines: Vec<String> = match opts.box_width {
        Some(box_width) => wrap_text_to_lines(text, set, box_width),
        None => text.split('\n').map(str::to_string).collect(),
    };

    let mut line_strings = lines;
    let mut line_images: Vec<RgbaImage> = line_strings
        .iter()
        .map(|line| compose_string(set, line))
        .collect();

    if let Some(box_height) = opts.box_height {
        if !line_images.is_empty() {
            while stacked_height(&line_images, opts.line_spacing) > box_height
                && line_images.len() > 1
            {
                line_images.pop();
                line_strings.pop();
            }

            if stacked_height(&line_images, opts.line_spacing) > box_height {
                let last = line_images.len() - 1;
                let ell_w = compose_string(set, ELLIPSIS).width();
                let trimmed = ellipsize(set, &line_strings[last], opts.box_width, ell_w);
                line_images[last] = compose_string(set, &trimmed);
                line_strings[last] = trimmed;
            }
        }
    }

    let total_w = line_images.iter().map(RgbaImage::width).max().unwrap_or(0);
    let total_h = stacked_height(&line_images, opts.line_spacing);
    let background = opts.bg_color.unwrap_or(Rgba([0, 0, 0, 0]));

    let mut out = RgbaImage::from_pixel(total_w, total_h, background);
    let mut y: i64 = 0;
    for li in &line_images {
        let x = if total_w > li.width() {
            ((total_w - li.width()) / 2) as i64
        } else {
            0
        };
        imageops::overlay(&mut out, li, x, y);
        y += li.height() as i64 + opts.line_spacing as i64;
    }
    out
}

/// Parses `#RRGGBB` or `R,G,B` into an opaque color.
///
/// Anything malformed yields `None`, which renders as no background fill.
pub fn parse_color(s: &str) -> Option<Rgba<u8>> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Rgba([r, g, b, 255]));
    }

    let parts: Vec<&str> = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r: u8 = parts[0].parse().ok()?;
    let g: u8 = parts[1].parse().ok()?;
    let b: u8 = parts[2].parse().ok()?;
    Some(Rgba([r, g, b, 255]))
}

/// Writes `image` as a PNG at `out_path`, creating missing parent
/// directories.
pub fn save_image(image: &RgbaImage, out_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    image
        .save(out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::glyphs::GlyphSet;
    use super::super::mapping::GlyphKey;
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    /// 'a' is 3×5 red, 'b' is 4×7 blue, '.' is 2×2 green.
    fn painted_set(space_width: u32) -> GlyphSet {
        let mut images = HashMap::new();
        images.insert(GlyphKey::Char('a'), solid(3, 5, [255, 0, 0, 255]));
        images.insert(GlyphKey::Char('b'), solid(4, 7, [0, 0, 255, 255]));
        images.insert(GlyphKey::Char('.'), solid(2, 2, [0, 255, 0, 255]));
        GlyphSet::from_images(images, space_width)
    }

    #[test]
    fn empty_string_composes_to_minimal_image() {
        let set = painted_set(6);
        let img = compose_string(&set, "");
        assert_eq!((img.width(), img.height()), (6, 1));
    }

    #[test]
    fn strip_width_is_sum_and_height_is_max() {
        let set = painted_set(6);
        let img = compose_string(&set, "ab");
        assert_eq!((img.width(), img.height()), (7, 7));
    }

    #[test]
    fn glyphs_are_bottom_aligned() {
        let set = painted_set(6);
        let img = compose_string(&set, "ab");
        // 'a' is 5 tall in a 7-tall strip: rows 0..2 above it are empty.
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(*img.get_pixel(0, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(0, 6), Rgba([255, 0, 0, 255]));
        // 'b' fills its full column.
        assert_eq!(*img.get_pixel(3, 0), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn spaces_become_transparent_spacers() {
        let set = painted_set(6);
        let img = compose_string(&set, "a a");
        assert_eq!(img.width(), 3 + 6 + 3);
        // Middle of the spacer is transparent.
        assert_eq!(img.get_pixel(4, 4)[3], 0);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let set = painted_set(6);
        let img = compose_string(&set, "a?a");
        assert_eq!(img.width(), 6);
    }

    #[test]
    fn lines_stack_with_spacing_and_centering() {
        let set = painted_set(6);
        let opts = DialogueOptions {
            line_spacing: 2,
            ..DialogueOptions::default()
        };
        // No box_width: explicit newlines only. "aa" (6 wide), "b" (4 wide).
        let img = render_dialogue("aa\nb", &set, &opts);
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 5 + 2 + 7);
        // Second line is centered: x offset (6 - 4) / 2 = 1.
        assert_eq!(img.get_pixel(0, 7)[3], 0);
        assert_eq!(*img.get_pixel(1, 7), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn background_color_fills_the_image() {
        let set = painted_set(6);
        let opts = DialogueOptions {
            bg_color: Some(Rgba([10, 20, 30, 255])),
            ..DialogueOptions::default()
        };
        // 'a' is shorter than 'b', leaving transparent rows above it.
        let img = render_dialogue("ab", &set, &opts);
        assert_eq!(*img.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
        assert_eq!(*img.get_pixel(0, 2), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn overflowing_lines_are_dropped_from_the_end() {
        let set = painted_set(6);
        let opts = DialogueOptions {
            line_spacing: 2,
            box_height: Some(12),
            ..DialogueOptions::default()
        };
        // Three 5-tall lines: 5+2+5+2+5 = 19 > 12, two lines fit exactly.
        let img = render_dialogue("a\na\na", &set, &opts);
        assert_eq!(img.height(), 12);
    }

    #[test]
    fn lone_overflowing_line_is_ellipsized_to_box_width() {
        let set = painted_set(6);
        let opts = DialogueOptions {
            line_spacing: 2,
            box_width: Some(10),
            box_height: Some(1),
            ..DialogueOptions::default()
        };
        // A single 5-tall line can never fit a 1px box; it gets width-trimmed
        // instead: "aa" becomes "a" + "..." = 3 + 3*2 = 9px.
        let img = render_dialogue("aa", &set, &opts);
        assert!(img.width() <= 10);
        // The green '.' glyphs of the ellipsis are present at the end.
        let right_bottom = *img.get_pixel(img.width() - 1, img.height() - 1);
        assert_eq!(right_bottom, Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn nothing_fits_falls_back_to_lone_ellipsis() {
        let set = painted_set(6);
        let ell_w = compose_string(&set, "...").width();
        let trimmed = ellipsize(&set, "aaaa", Some(ell_w - 1), ell_w);
        assert_eq!(trimmed, "...");
    }

    #[test]
    fn parse_color_accepts_hex() {
        assert_eq!(parse_color("#FF8000"), Some(Rgba([255, 128, 0, 255])));
        assert_eq!(parse_color(" #000000 "), Some(Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn parse_color_accepts_comma_triples() {
        assert_eq!(parse_color("255, 0, 10"), Some(Rgba([255, 0, 10, 255])));
    }

    #[test]
    fn parse_color_rejects_malformed_strings() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#GG0000"), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("300,0,0"), None);
        assert_eq!(parse_color("1,2"), None);
        assert_eq!(parse_color("red"), None);
    }

    #[test]
    fn wrap_and_fit_integration_respects_box() {
        let chars: Vec<(char, u32)> = ('a'..='z').map(|ch| (ch, 10)).collect();
        let mut images = HashMap::new();
        for (ch, w) in chars {
            images.insert(GlyphKey::Char(ch), solid(w, 5, [255, 255, 255, 255]));
        }
        images.insert(GlyphKey::Char('.'), solid(2, 2, [255, 255, 255, 255]));
        let set = GlyphSet::from_images(images, 10);

        let opts = DialogueOptions {
            line_spacing: 8,
            bg_color: None,
            box_width: Some(60),
            box_height: Some(20),
        };
        // "hello world" wraps to two 50px lines; 5+8+5 = 18 <= 20 fits.
        let img = render_dialogue("hello world", &set, &opts);
        assert_eq!(img.width(), 50);
        assert_eq!(img.height(), 18);
    }
}
