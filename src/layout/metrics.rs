//! Approximate text metrics.
//!
//! Widths are estimated from the font size alone (`0.48 × size` per character) instead of real
//! glyph advances. The preview renderer uses the same estimate, so every wrapping decision made
//! here is reproducible there character for character.

use crate::layout::consts::{BODY_FONT_SIZE, BODY_TEXT_WIDTH};

/// Estimated advance of one character, as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f64 = 0.48;

/// Estimated width of a single character at `font_size`.
pub fn estimate_char_width(font_size: f64) -> f64 {
    font_size * CHAR_WIDTH_RATIO
}

/// Number of characters that fit on one line of `max_width` pixels at `font_size`.
pub fn max_chars_per_line(max_width: f64, font_size: f64) -> usize {
    let w = estimate_char_width(font_size);
    if !(w > 0.0) || !max_width.is_finite() || max_width <= 0.0 {
        return 0;
    }
    (max_width / w).floor() as usize
}

/// Length of `s` as counted by the estimator (Unicode scalar values).
pub fn text_len(s: &str) -> usize {
    s.chars().count()
}

/// First-fit word wrap.
///
/// Words are separated by any whitespace. A word longer than `max_chars` still gets a line of
/// its own; callers that care detect it through [`text_len`].
pub fn wrap_greedy(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = text_len(word);
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Greedy line count of the upper-cased `title` at `font_size`. Never less than one.
pub fn count_lines(title: &str, max_width: f64, font_size: u32) -> usize {
    let max_chars = max_chars_per_line(max_width, f64::from(font_size));
    wrap_greedy(&title.to_uppercase(), max_chars).len().max(1)
}

/// Wrap body text at the fixed body width and size.
///
/// Explicit newlines are hard breaks; a blank paragraph keeps its empty line.
pub fn wrap_body(text: &str) -> Vec<String> {
    let max_chars = max_chars_per_line(BODY_TEXT_WIDTH, BODY_FONT_SIZE);
    let mut lines = Vec::new();
    for paragraph in text.trim().lines() {
        let wrapped = wrap_greedy(paragraph, max_chars);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;
