use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;

use super::mapping::{GlyphKey, GlyphMapping};

/// Decoded glyph images plus the width table derived from them.
///
/// Width lookups fall back from the exact character to its lowercase form
/// and finally to `space_width`; the space character always measures
/// `space_width` even when a `Space.png` glyph exists.
pub struct GlyphSet {
    images: HashMap<GlyphKey, RgbaImage>,
    space_width: u32,
    has_quote_tokens: bool,
}

impl GlyphSet {
    /// Decodes every mapped glyph file under `font_dir`.
    ///
    /// Files that fail to decode are skipped with a warning; composition
    /// then treats their characters as unknown.
    pub fn load(font_dir: &Path, mapping: &GlyphMapping, space_width: u32) -> Self {
        let mut images = HashMap::new();
        for (key, filename) in mapping.iter() {
            let path = font_dir.join(filename);
            match image::open(&path) {
                Ok(img) => {
                    images.insert(key.clone(), img.to_rgba8());
                }
                Err(e) => log::warn!("Skipping glyph {}: {}", path.display(), e),
            }
        }

        GlyphSet {
            images,
            space_width,
            has_quote_tokens: mapping.has_quote_tokens(),
        }
    }

    /// Builds a set directly from already-decoded images.
    #[cfg(test)]
    pub fn from_images(images: HashMap<GlyphKey, RgbaImage>, space_width: u32) -> Self {
        let has_quote_tokens = images.contains_key(&GlyphKey::token("Left_quote"))
            || images.contains_key(&GlyphKey::token("Right_quote"));
        GlyphSet {
            images,
            space_width,
            has_quote_tokens,
        }
    }

    pub fn space_width(&self) -> u32 {
        self.space_width
    }

    fn quote_token_for(&self, quote_open: bool) -> GlyphKey {
        if quote_open {
            GlyphKey::token("Right_quote")
        } else {
            GlyphKey::token("Left_quote")
        }
    }

    fn lowercase(ch: char) -> Option<char> {
        ch.to_lowercase().next()
    }

    fn width_of(&self, key: &GlyphKey) -> Option<u32> {
        self.images.get(key).map(RgbaImage::width)
    }

    /// Resolves the image for one character, advancing the quote toggle.
    ///
    /// Returns `None` for characters with no usable glyph (including spaces,
    /// which the caller renders as transparent spacers).
    pub fn image_for_char(&self, ch: char, quote_open: &mut bool) -> Option<&RgbaImage> {
        if ch == '"' && self.has_quote_tokens {
            let token = self.quote_token_for(*quote_open);
            *quote_open = !*quote_open;
            if let Some(img) = self.images.get(&token) {
                return Some(img);
            }
        }

        if let Some(img) = self.images.get(&GlyphKey::Char(ch)) {
            return Some(img);
        }
        Self::lowercase(ch).and_then(|lc| self.images.get(&GlyphKey::Char(lc)))
    }

    /// Pixel width one character contributes, advancing the quote toggle.
    pub fn char_width(&self, ch: char, quote_open: &mut bool) -> u32 {
        if ch == ' ' {
            return self.space_width;
        }

        if ch == '"' && self.has_quote_tokens {
            let token = self.quote_token_for(*quote_open);
            *quote_open = !*quote_open;
            return self
                .width_of(&token)
                .or_else(|| self.width_of(&GlyphKey::Char('"')))
                .unwrap_or(self.space_width);
        }

        self.width_of(&GlyphKey::Char(ch))
            .or_else(|| {
                Self::lowercase(ch).and_then(|lc| self.width_of(&GlyphKey::Char(lc)))
            })
            .unwrap_or(self.space_width)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A transparent glyph image of the given size.
    pub fn glyph(width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    /// A set mapping each `(char, width)` pair to a `width`×5 glyph.
    pub fn set_of(chars: &[(char, u32)], space_width: u32) -> GlyphSet {
        let mut images = HashMap::new();
        for &(ch, width) in chars {
            images.insert(GlyphKey::Char(ch), glyph(width, 5));
        }
        GlyphSet::from_images(images, space_width)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{glyph, set_of};
    use super::*;

    #[test]
    fn known_character_uses_glyph_width() {
        let set = set_of(&[('a', 7)], 10);
        let mut quote_open = false;
        assert_eq!(set.char_width('a', &mut quote_open), 7);
    }

    #[test]
    fn unknown_character_falls_back_to_space_width() {
        let set = set_of(&[('a', 7)], 10);
        let mut quote_open = false;
        assert_eq!(set.char_width('z', &mut quote_open), 10);
    }

    #[test]
    fn uppercase_falls_back_to_lowercase_glyph() {
        let set = set_of(&[('a', 7)], 10);
        let mut quote_open = false;
        assert_eq!(set.char_width('A', &mut quote_open), 7);
        assert!(set.image_for_char('A', &mut quote_open).is_some());
    }

    #[test]
    fn space_always_measures_space_width() {
        let mut images = HashMap::new();
        images.insert(GlyphKey::Char(' '), glyph(23, 5));
        let set = GlyphSet::from_images(images, 10);
        let mut quote_open = false;
        assert_eq!(set.char_width(' ', &mut quote_open), 10);
        // But composition still uses the mapped glyph image.
        assert_eq!(
            set.image_for_char(' ', &mut quote_open).map(|i| i.width()),
            Some(23)
        );
    }

    #[test]
    fn quotes_alternate_between_token_variants() {
        let mut images = HashMap::new();
        images.insert(GlyphKey::token("Left_quote"), glyph(3, 5));
        images.insert(GlyphKey::token("Right_quote"), glyph(5, 5));
        let set = GlyphSet::from_images(images, 10);

        let mut quote_open = false;
        assert_eq!(set.char_width('"', &mut quote_open), 3);
        assert_eq!(set.char_width('"', &mut quote_open), 5);
        assert_eq!(set.char_width('"', &mut quote_open), 3);
    }

    #[test]
    fn missing_quote_variant_falls_back_to_plain_quote() {
        let mut images = HashMap::new();
        images.insert(GlyphKey::token("Left_quote"), glyph(3, 5));
        images.insert(GlyphKey::Char('"'), glyph(4, 5));
        let set = GlyphSet::from_images(images, 10);

        let mut quote_open = false;
        // First quote uses the left variant, second has no right variant.
        assert_eq!(set.char_width('"', &mut quote_open), 3);
        assert_eq!(set.char_width('"', &mut quote_open), 4);
    }

    #[test]
    fn plain_quotes_without_tokens_use_char_entry() {
        let set = set_of(&[('"', 6)], 10);
        let mut quote_open = false;
        assert_eq!(set.char_width('"', &mut quote_open), 6);
        // No tokens mapped, so the toggle never advances.
        assert!(!quote_open);
    }
}
