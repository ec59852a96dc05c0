use super::glyphs::GlyphSet;

/// Measures a word's pixel width, advancing the quote toggle across it.
fn word_width(set: &GlyphSet, word: &str, quote_open: &mut bool) -> u32 {
    word.chars().map(|ch| set.char_width(ch, quote_open)).sum()
}

/// Greedily wraps `text` into lines no wider than `max_width` pixels.
///
/// Paragraphs (explicit newlines) wrap independently, and empty paragraphs
/// become empty output lines. Words are packed whole with a `space_width`
/// gap between them; a word wider than `max_width` on its own is broken at
/// the character where the running width would overflow. The quote toggle
/// resets per paragraph.
pub fn wrap_text_to_lines(text: &str, set: &GlyphSet, max_width: u32) -> Vec<String> {
    let space_width = set.space_width();
    let mut out_lines = Vec::new();

    for para in text.split('\n') {
        if para.is_empty() {
            out_lines.push(String::new());
            continue;
        }

        let mut cur_line = String::new();
        let mut cur_width = 0u32;
        let mut first_word = true;
        let mut quote_open = false;

        for word in para.split(' ') {
            let w = word_width(set, word, &mut quote_open);
            let space_w = if first_word { 0 } else { space_width };

            if first_word && w <= max_width {
                cur_line = word.to_string();
                cur_width = w;
                first_word = false;
                continue;
            }

            if cur_width + space_w + w <= max_width {
                if !first_word {
                    cur_line.push(' ');
                }
                cur_line.push_str(word);
                cur_width += space_w + w;
                first_word = false;
            } else if w > max_width {
                // The word can never fit whole; flush the current line, then
                // break the word by characters.
                if !cur_line.is_empty() {
                    out_lines.push(std::mem::take(&mut cur_line));
                    cur_width = 0;
                }

                let mut chunk = String::new();
                let mut chunk_w = 0u32;
                for ch in word.chars() {
                    let ch_w = set.char_width(ch, &mut quote_open);
                    if chunk_w + ch_w <= max_width {
                        chunk.push(ch);
                        chunk_w += ch_w;
                    } else {
                        if !chunk.is_empty() {
                            out_lines.push(std::mem::take(&mut chunk));
                        }
                        chunk.push(ch);
                        chunk_w = ch_w;
                    }
                }
                if !chunk.is_empty() {
                    cur_line = chunk;
                    cur_width = chunk_w;
                    first_word = false;
                }
            } else {
                // The word fits on a fresh line; flush the current one.
                if !cur_line.is_empty() {
                    out_lines.push(cur_line.clone());
                }
                cur_line = word.to_string();
                cur_width = w;
                first_word = false;
            }
        }

        if !cur_line.is_empty() {
            out_lines.push(cur_line);
        }
    }

    out_lines
}
