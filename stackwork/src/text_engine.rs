//! Text measurement.
//!
//! The layout engine never shapes glyphs itself; it asks a `TextMeasurer`
//! how wide and tall a string is at a given wrap width. The default
//! `MonospaceMeasurer` is deterministic and cheap (cell widths from
//! `unicode-width`), which is what tests and the dump tool use. With the
//! `cosmic-text` feature, `CosmicMeasurer` shapes real fonts.

use unicode_width::UnicodeWidthChar;

use crate::config::LayoutConfig;
use crate::layout::length::{BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT};

/// Slack for float comparisons when deciding whether a word still fits.
const FIT_EPSILON: f32 = 0.001;

/// Result of measuring a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of the widest line.
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Number of lines after wrapping.
    pub lines: usize,
}

/// Measures text for the layout engine.
pub trait TextMeasurer {
    /// Measure `text` at `font_size`, wrapping at `max_width` when given.
    /// `None` means "never wrap" (explicit newlines still break lines).
    fn measure(&self, text: &str, font_size: f32, max_width: Option<f32>) -> TextMetrics;

    /// Width of the widest unbreakable word.
    fn min_content_width(&self, text: &str, font_size: f32) -> f32;
}

/// Estimate display width in cell units (1 for Latin, 2 for CJK, 0 for combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

/// Fixed-advance text measurer.
///
/// Scales metrics linearly with font size, the same way a monospace font
/// scales.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub char_width: f32,
    pub line_height: f32,
    pub base_font_size: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: CHAR_WIDTH,
            line_height: LINE_HEIGHT,
            base_font_size: BASE_FONT_SIZE,
        }
    }
}

impl MonospaceMeasurer {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
            base_font_size: BASE_FONT_SIZE,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            char_width: config.char_width,
            line_height: config.line_height,
            base_font_size: config.base_font_size,
        }
    }

    fn scaled(&self, font_size: f32) -> (f32, f32) {
        if font_size > 0.0 && self.base_font_size > 0.0 {
            let scale = font_size / self.base_font_size;
            (self.char_width * scale, self.line_height * scale)
        } else {
            (self.char_width, self.line_height)
        }
    }

    /// Greedy word wrap of one paragraph. Returns `(widest_line, line_count)`.
    fn wrap_paragraph(paragraph: &str, cell: f32, limit: f32) -> (f32, usize) {
        let space = cell;
        let mut widest = 0.0f32;
        let mut lines = 1usize;
        let mut line = 0.0f32;
        let mut has_content = false;

        for word in paragraph.split_whitespace() {
            let w = unicode_display_width(word) * cell;
            let needed = if has_content { line + space + w } else { w };
            if needed <= limit + FIT_EPSILON {
                line = needed;
                has_content = true;
                continue;
            }

            if has_content {
                widest = widest.max(line);
                lines += 1;
                line = 0.0;
                has_content = false;
            }

            if w <= limit + FIT_EPSILON {
                line = w;
                has_content = true;
                continue;
            }

            // Word wider than the line: break between characters.
            for ch in word.chars() {
                let c = UnicodeWidthChar::width(ch).unwrap_or(0) as f32 * cell;
                if has_content && line + c > limit + FIT_EPSILON {
                    widest = widest.max(line);
                    lines += 1;
                    line = 0.0;
                }
                line += c;
                has_content = true;
            }
        }

        (widest.max(line), lines)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: f32, max_width: Option<f32>) -> TextMetrics {
        let (cell, line_height) = self.scaled(font_size);
        let mut width = 0.0f32;
        let mut lines = 0usize;

        for paragraph in text.split('\n') {
            match max_width {
                Some(limit) if limit.is_finite() => {
                    let (w, n) = Self::wrap_paragraph(paragraph, cell, limit.max(0.0));
                    width = width.max(w);
                    lines += n;
                }
                _ => {
                    width = width.max(unicode_display_width(paragraph) * cell);
                    lines += 1;
                }
            }
        }

        TextMetrics {
            width,
            height: lines as f32 * line_height,
            lines,
        }
    }

    fn min_content_width(&self, text: &str, font_size: f32) -> f32 {
        let (cell, _) = self.scaled(font_size);
        text.split_whitespace()
            .map(|word| unicode_display_width(word) * cell)
            .fold(0.0, f32::max)
    }
}

#[cfg(feature = "cosmic-text")]
pub use cosmic::CosmicMeasurer;

#[cfg(feature = "cosmic-text")]
mod cosmic {
    use std::sync::Mutex;

    use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping};

    use super::{TextMeasurer, TextMetrics};

    /// Text measurer backed by cosmic-text shaping.
    pub struct CosmicMeasurer {
        font_system: Mutex<FontSystem>,
        /// Line height as a multiple of font size.
        line_height_ratio: f32,
    }

    impl CosmicMeasurer {
        pub fn new(line_height_ratio: f32) -> Self {
            Self {
                font_system: Mutex::new(FontSystem::new()),
                line_height_ratio,
            }
        }
    }

    impl Default for CosmicMeasurer {
        fn default() -> Self {
            Self::new(18.0 / 14.0)
        }
    }

    impl TextMeasurer for CosmicMeasurer {
        fn measure(&self, text: &str, font_size: f32, max_width: Option<f32>) -> TextMetrics {
            let mut font_system = self
                .font_system
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let metrics = Metrics::new(font_size, font_size * self.line_height_ratio);
            let mut buffer = Buffer::new(&mut font_system, metrics);
            buffer.set_size(&mut font_system, max_width.filter(|w| w.is_finite()), None);
            buffer.set_text(&mut font_system, text, Attrs::new(), Shaping::Advanced);
            buffer.shape_until_scroll(&mut font_system, false);

            let mut width = 0.0f32;
            let mut lines = 0usize;
            for run in buffer.layout_runs() {
                width = width.max(run.line_w);
                lines += 1;
            }
            let lines = lines.max(1);

            TextMetrics {
                width,
                height: lines as f32 * metrics.line_height,
                lines,
            }
        }

        fn min_content_width(&self, text: &str, font_size: f32) -> f32 {
            text.split_whitespace()
                .map(|word| self.measure(word, font_size, None).width)
                .fold(0.0, f32::max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(10.0, 18.0)
    }

    #[test]
    fn test_single_line_nowrap() {
        let m = measurer().measure("hello world", 14.0, None);
        assert_eq!(m.width, 110.0);
        assert_eq!(m.height, 18.0);
        assert_eq!(m.lines, 1);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        // "aaaa bbbb cccc dddd" at 45px: one word per line
        let m = measurer().measure("aaaa bbbb cccc dddd", 14.0, Some(45.0));
        assert_eq!(m.lines, 4);
        assert_eq!(m.height, 72.0);
        assert_eq!(m.width, 40.0);
    }

    #[test]
    fn test_wrap_packs_words_that_fit() {
        let m = measurer().measure("aa bb cc", 14.0, Some(50.0));
        // "aa bb" = 50px, "cc" on the next line
        assert_eq!(m.lines, 2);
        assert_eq!(m.width, 50.0);
    }

    #[test]
    fn test_breaks_long_words() {
        let m = measurer().measure("abcdefghij", 14.0, Some(30.0));
        assert_eq!(m.lines, 4);
        assert_eq!(m.width, 30.0);
    }

    #[test]
    fn test_explicit_newlines() {
        let m = measurer().measure("one\ntwo\n", 14.0, None);
        assert_eq!(m.lines, 3);
        assert_eq!(m.width, 30.0);
    }

    #[test]
    fn test_font_size_scales_metrics() {
        let m = measurer().measure("ab", 28.0, None);
        assert_eq!(m.width, 40.0);
        assert_eq!(m.height, 36.0);
    }

    #[test]
    fn test_min_content_width() {
        assert_eq!(measurer().min_content_width("a bbb cc", 14.0), 30.0);
        assert_eq!(measurer().min_content_width("", 14.0), 0.0);
    }

    #[test]
    fn test_wide_characters() {
        // CJK characters occupy two cells
        assert_eq!(unicode_display_width("日本"), 4.0);
        assert_eq!(measurer().measure("日本", 14.0, None).width, 40.0);
    }
}
