use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Named punctuation stems and the characters they render.
const NAMED_TOKENS: &[(&str, char)] = &[
    ("Period", '.'),
    ("Comma", ','),
    ("Left_quote", '"'),
    ("Right_quote", '"'),
    ("Left_slash", '/'),
    ("Right_slash", '/'),
    ("Underscore", '_'),
    ("Dash", '-'),
    ("Space", ' '),
    ("Plus", '+'),
    ("Equals", '='),
];

/// Key a glyph file is looked up under.
///
/// Named-token files are retained under both the visible character and a
/// `Token` entry, so directional variants (left/right quotes) stay
/// distinguishable after the character mapping collapses them to `"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphKey {
    /// A visible character.
    Char(char),
    /// A named-token disambiguation entry, e.g. `Left_quote`.
    Token(String),
    /// A whole filename stem used as a custom symbol.
    Symbol(String),
}

impl GlyphKey {
    pub fn token(name: &str) -> Self {
        GlyphKey::Token(name.to_string())
    }
}

impl fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphKey::Char(ch) => write!(f, "{:?}", ch),
            GlyphKey::Token(name) => write!(f, "token:{}", name),
            GlyphKey::Symbol(stem) => write!(f, "symbol:{}", stem),
        }
    }
}

/// Keys a filename stem maps to, in the order the naming rules apply:
/// `Upper_`/`Lower_` prefixes, single characters, named tokens, and finally
/// the whole stem as a custom symbol.
fn keys_for_stem(stem: &str) -> Vec<GlyphKey> {
    if let Some(rest) = stem
        .strip_prefix("Upper_")
        .or_else(|| stem.strip_prefix("Lower_"))
    {
        if !rest.is_empty() {
            let mut chars = rest.chars();
            let first = chars.next().expect("rest is non-empty");
            return if chars.next().is_none() {
                vec![GlyphKey::Char(first)]
            } else {
                vec![GlyphKey::Symbol(rest.to_string())]
            };
        }
    }

    let mut chars = stem.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        return vec![GlyphKey::Char(only)];
    }

    if let Some(&(name, ch)) = NAMED_TOKENS.iter().find(|&&(name, _)| name == stem) {
        return vec![GlyphKey::Char(ch), GlyphKey::token(name)];
    }

    vec![GlyphKey::Symbol(stem.to_string())]
}

/// The stem of a `.png` filename (case-insensitive extension), or `None`
/// for anything else.
fn png_stem(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if ext.eq_ignore_ascii_case("png") {
        Some(stem)
    } else {
        None
    }
}

/// A reported key collision: two files claimed the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub key: GlyphKey,
    pub previous: String,
    pub replacement: String,
}

/// Character-to-glyph-filename mapping built from a font directory listing.
#[derive(Debug, Default)]
pub struct GlyphMapping {
    entries: BTreeMap<GlyphKey, String>,
    collisions: Vec<Collision>,
}

impl GlyphMapping {
    /// Folds one glyph filename into the mapping. Non-PNG files are ignored.
    ///
    /// Later files win on collision; every overwrite is recorded so the
    /// caller can surface it instead of silently masking the earlier file.
    pub fn insert_file(&mut self, filename: &str) {
        let Some(stem) = png_stem(filename) else {
            return;
        };
        for key in keys_for_stem(stem) {
            if let Some(previous) = self.entries.insert(key.clone(), filename.to_string()) {
                if previous != filename {
                    self.collisions.push(Collision {
                        key,
                        previous,
                        replacement: filename.to_string(),
                    });
                }
            }
        }
    }

    pub fn get(&self, key: &GlyphKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &GlyphKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether either directional quote token is mapped.
    pub fn has_quote_tokens(&self) -> bool {
        self.contains(&GlyphKey::token("Left_quote"))
            || self.contains(&GlyphKey::token("Right_quote"))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GlyphKey, &str)> {
        self.entries.iter().map(|(key, file)| (key, file.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }
}

/// Builds the glyph mapping from a font directory.
///
/// Filenames are sorted first so collision resolution does not depend on
/// directory iteration order. A missing or unreadable directory yields an
/// empty mapping.
pub fn build_mapping(font_dir: &Path) -> GlyphMapping {
    let mut filenames: Vec<String> = match fs::read_dir(font_dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect(),
        Err(e) => {
            log::warn!(
                "Could not read font directory {}: {}",
                font_dir.display(),
                e
            );
            return GlyphMapping::default();
        }
    };
    filenames.sort();

    let mut mapping = GlyphMapping::default();
    for filename in &filenames {
        mapping.insert_file(filename);
    }

    for collision in mapping.collisions() {
        log::warn!(
            "Glyph key {} is claimed by both {} and {}; keeping {}",
            collision.key,
            collision.previous,
            collision.replacement,
            collision.replacement
        );
    }

    mapping
}
