//! Text layout helpers

/// Approximate glyph width as a fraction of the font size.
/// macroquad's `measure_text` is slow per word, so wrapping uses this.
const CHAR_WIDTH_FACTOR: f32 = 0.55;

/// Approximate width of a line of text in pixels
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR
}

/// Wrap text to fit within a given pixel width.
///
/// Explicit newlines start a new paragraph. A single word wider than the
/// line is kept whole on its own line.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if current.is_empty() || text_width(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    lines
}
