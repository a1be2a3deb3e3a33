//! Text metrics for layout resolution.
//!
//! The sizing pipeline never talks to a font engine directly. It asks a [`TextMetrics`]
//! implementation for widths, heights and wrapped text, which keeps the core free of any
//! specific text stack and lets tests swap in [`ApproximateMetrics`] for reproducible
//! numbers. Backends like `trellis-text` implement the trait with real font data.

use crate::content::{FontId, TextContent};

/// Request to measure (or wrap) a piece of text.
#[derive(Debug, Clone, Copy)]
pub struct TextRequest<'a> {
    pub text: &'a str,
    pub font_id: &'a FontId,
    /// Font size in points
    pub font_size: f32,
}

impl<'a> TextRequest<'a> {
    pub fn new(text: &'a str, font_id: &'a FontId, font_size: f32) -> Self {
        Self {
            text,
            font_id,
            font_size,
        }
    }

    /// Request for the laid out value of a text node
    pub fn from_text_content(content: &'a TextContent) -> Self {
        Self::new(content.value(), &content.font_id, content.font_size)
    }
}

/// Intrinsic size measurement result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Text metrics oracle consumed by the sizing pipeline.
///
/// Implementations must never fail: when a font cannot be resolved they fall back to an
/// approximation (see [`ApproximateMetrics`]) so layout always completes.
pub trait TextMetrics {
    /// Width of the widest line of `request.text`.
    fn measure_width(&mut self, request: TextRequest<'_>) -> f32;

    /// Line height multiplied by the number of lines in `request.text`.
    fn measure_height(&mut self, request: TextRequest<'_>) -> f32;

    /// Greedily break `request.text` into lines no wider than `max_width`.
    ///
    /// Returns the text unchanged when `max_width <= 0` or the text is empty.
    fn wrap_to_width(&mut self, request: TextRequest<'_>, max_width: f32) -> String;

    /// Width and height in one call
    fn measure(&mut self, request: TextRequest<'_>) -> IntrinsicSize {
        IntrinsicSize::new(self.measure_width(request), self.measure_height(request))
    }
}

/// Number of lines in `text`. Empty text has no lines.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}

/// Greedy word wrapping shared by all metrics implementations.
///
/// Words are whitespace-delimited and re-joined with single spaces; a line grows while
/// `measure(line) <= max_width`. A word wider than `max_width` gets a line of its own and
/// is never split. Existing line breaks are kept as paragraph boundaries.
///
/// ```
/// # use trellis::wrap_words;
/// let wrapped = wrap_words("aa bb cc", 5.0, |line| line.chars().count() as f32);
/// assert_eq!(wrapped, "aa bb\ncc");
/// ```
pub fn wrap_words(text: &str, max_width: f32, mut measure: impl FnMut(&str) -> f32) -> String {
    if max_width <= 0.0 || text.is_empty() {
        return text.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }

            let mut candidate = String::with_capacity(line.len() + 1 + word.len());
            candidate.push_str(&line);
            candidate.push(' ');
            candidate.push_str(word);

            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Fixed-advance text metrics.
///
/// Every character advances `font_size * advance` and every line is
/// `font_size * line_height` tall. The default ratios (0.6 / 1.2) are the approximation
/// used whenever a real font cannot be resolved; custom ratios make a convenient
/// deterministic oracle for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    /// Character advance as a multiple of the font size
    pub advance: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl ApproximateMetrics {
    pub const DEFAULT_ADVANCE: f32 = 0.6;
    pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    fn char_width(&self, font_size: f32) -> f32 {
        font_size * self.advance
    }
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ADVANCE, Self::DEFAULT_LINE_HEIGHT)
    }
}

impl TextMetrics for ApproximateMetrics {
    fn measure_width(&mut self, request: TextRequest<'_>) -> f32 {
        let char_width = self.char_width(request.font_size);
        request
            .text
            .split('\n')
            .map(|line| line.chars().count() as f32 * char_width)
            .fold(0.0, f32::max)
    }

    fn measure_height(&mut self, request: TextRequest<'_>) -> f32 {
        request.font_size * self.line_height * line_count(request.text) as f32
    }

    fn wrap_to_width(&mut self, request: TextRequest<'_>, max_width: f32) -> String {
        let char_width = self.char_width(request.font_size);
        if max_width <= 0.0 || char_width <= 0.0 || request.text.is_empty() {
            return request.text.to_string();
        }

        // Same arithmetic as `measure_width`, so text wrapped to its own measured width
        // stays on one line. Equivalent to wrapping at floor(max_width / char_width) chars.
        wrap_words(request.text, max_width, |line| {
            line.chars().count() as f32 * char_width
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(text: &'a str, font: &'a FontId, size: f32) -> TextRequest<'a> {
        TextRequest::new(text, font, size)
    }

    fn wrap_by_char_count(text: &str, max_chars: usize) -> String {
        wrap_words(text, max_chars as f32, |line| line.chars().count() as f32)
    }

    #[test]
    fn test_approximate_width_uses_widest_line() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();

        let single = metrics.measure_width(request("Hello World", &font, 12.0));
        let multi = metrics.measure_width(request("Hello\nWorld", &font, 12.0));

        assert!((single - 11.0 * 7.2).abs() < 1e-4);
        assert!((multi - 5.0 * 7.2).abs() < 1e-4);
    }

    #[test]
    fn test_approximate_empty_text_is_zero() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        assert_eq!(
            metrics.measure(request("", &font, 12.0)),
            IntrinsicSize::zero()
        );
    }

    #[test]
    fn test_larger_font_measures_larger() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        let small = metrics.measure(request("Test", &font, 10.0));
        let large = metrics.measure(request("Test", &font, 20.0));
        assert!(large.width > small.width);
        assert!(large.height > small.height);
    }

    #[test]
    fn test_two_lines_are_taller_than_one() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        let one = metrics.measure_height(request("Hello World", &font, 12.0));
        let two = metrics.measure_height(request("Hello\nWorld", &font, 12.0));
        assert!(two > one);
        assert!((two - 2.0 * 14.4).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_returns_original_for_non_positive_width() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        assert_eq!(
            metrics.wrap_to_width(request("Hello World", &font, 12.0), 0.0),
            "Hello World"
        );
        assert_eq!(
            metrics.wrap_to_width(request("Hello World", &font, 12.0), -100.0),
            "Hello World"
        );
        assert_eq!(metrics.wrap_to_width(request("", &font, 12.0), 100.0), "");
    }

    #[test]
    fn test_wrap_long_text_by_char_count() {
        let font = FontId::default();
        // 5 points per character at size 10
        let mut metrics = ApproximateMetrics::new(0.5, 1.0);
        let text = "Hello World How Are You";

        let wrapped = metrics.wrap_to_width(request(text, &font, 10.0), 25.0);
        assert_eq!(wrapped, "Hello\nWorld\nHow\nAre\nYou");

        let wrapped = metrics.wrap_to_width(request(text, &font, 10.0), 50.0);
        assert_eq!(wrapped, "Hello\nWorld How\nAre You");

        let wrapped = metrics.wrap_to_width(request(text, &font, 10.0), 60.0);
        assert_eq!(wrapped, "Hello World\nHow Are You");

        let wrapped = metrics.wrap_to_width(request(text, &font, 10.0), 100.0);
        assert_eq!(wrapped, "Hello World How Are\nYou");
    }

    #[test]
    fn test_wrap_preserves_short_text() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        assert_eq!(metrics.wrap_to_width(request("Hi", &font, 12.0), 1000.0), "Hi");
    }

    #[test]
    fn test_wrapped_lines_never_exceed_width_unless_single_word() {
        let font = FontId::default();
        let mut metrics = ApproximateMetrics::default();
        let text = "the quick brown fox jumps over the extraordinarily lazy dog";
        let max_width = 80.0;
        let wrapped = metrics.wrap_to_width(request(text, &font, 12.0), max_width);

        for line in wrapped.lines() {
            let width = metrics.measure_width(request(line, &font, 12.0));
            assert!(width <= max_width || !line.contains(' '), "line {line:?} too wide");
        }
    }

    #[test]
    fn test_wrap_by_char_count_edge_cases() {
        assert!(wrap_by_char_count("Hello World Test", 5).lines().count() >= 2);
        assert_eq!(
            wrap_by_char_count("Supercalifragilisticexpialidocious", 5),
            "Supercalifragilisticexpialidocious"
        );
        assert_eq!(wrap_by_char_count("Hi", 100), "Hi");
        assert_eq!(wrap_by_char_count("", 10), "");
        assert_eq!(wrap_by_char_count("   ", 10), "");
    }

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let wrapped = wrap_by_char_count("ab cd\nef gh", 20);
        assert_eq!(wrapped, "ab cd\nef gh");
    }

    #[test]
    fn test_wrapping_is_stable_when_repeated() {
        let once = wrap_by_char_count("one two three four five six", 9);
        let twice = wrap_by_char_count(&once, 9);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 0);
        assert_eq!(line_count("a"), 1);
        assert_eq!(line_count("a\nb\n"), 3);
    }
}
