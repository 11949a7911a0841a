//! Line counting and gutter sizing

/// Horizontal padding around the numbers in the gutter
const GUTTER_PADDING: f32 = 20.0;
/// Narrowest gutter, used for short documents
const MIN_GUTTER_WIDTH: f32 = 30.0;
/// Approximate advance of one monospace digit relative to font size
const DIGIT_WIDTH_FACTOR: f32 = 0.6;

/// Count the lines of `text`. Empty text is one empty line.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Number of decimal digits needed to print `n`.
pub fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Width of a gutter that fits the largest line number of `text`.
pub fn gutter_width(text: &str, font_size: f32) -> f32 {
    let digits = digit_count(count_lines(text)) as f32;
    (digits * font_size * DIGIT_WIDTH_FACTOR + GUTTER_PADDING).max(MIN_GUTTER_WIDTH)
}
