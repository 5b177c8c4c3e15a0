//! Text metrics used to size node bodies and link labels.
//!
//! Layout itself belongs to the host; the engine only needs the box a string
//! occupies at a given font size. Hosts with real font metrics implement
//! [`TextMeasure`] and hand it to [`crate::Graph::with_measurer`].

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const NODE_FONT_SIZE: f64 = 20.0;
pub const NODE_DETAILS_FONT_SIZE: f64 = 16.0;
pub const NODE_PADDING: f64 = 20.0;

pub const LINK_FONT_SIZE: f64 = 18.0;
pub const LINK_TEXT_PADDING_X: f64 = 20.0;
pub const LINK_TEXT_PADDING_Y: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasure {
    fn measure(&self, font_size: f64, text: &str) -> TextSize;
}

/// Monospace-ish estimate: every terminal column advances `advance_em` of the
/// font size, so CJK glyphs count double.
#[derive(Clone, Copy, Debug)]
pub struct GlyphAdvanceMeasure {
    pub advance_em: f64,
    pub line_height_em: f64,
}

impl Default for GlyphAdvanceMeasure {
    fn default() -> Self {
        Self { advance_em: 0.5, line_height_em: 1.25 }
    }
}

impl TextMeasure for GlyphAdvanceMeasure {
    fn measure(&self, font_size: f64, text: &str) -> TextSize {
        let font_size = font_size.max(1.0);
        let mut columns = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            columns = columns.max(UnicodeWidthStr::width(line));
            lines += 1;
        }
        TextSize {
            width: columns as f64 * font_size * self.advance_em,
            height: lines as f64 * font_size * self.line_height_em,
        }
    }
}

/// Body size for a node showing `text`: measured text plus padding on every side.
pub fn node_size_for_text(measure: &dyn TextMeasure, text: &str) -> TextSize {
    let size = measure.measure(NODE_FONT_SIZE, text);
    TextSize {
        width: size.width + 2.0 * NODE_PADDING,
        height: size.height + 2.0 * NODE_PADDING,
    }
}

/// Label box size for a link carrying `text`.
pub fn link_label_size(measure: &dyn TextMeasure, text: &str) -> TextSize {
    let size = measure.measure(LINK_FONT_SIZE, text);
    TextSize {
        width: size.width + 2.0 * LINK_TEXT_PADDING_X,
        height: size.height + 2.0 * LINK_TEXT_PADDING_Y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_glyphs_count_double() {
        let m = GlyphAdvanceMeasure::default();
        assert_eq!(m.measure(20.0, "ab").width, 20.0);
        assert_eq!(m.measure(20.0, "节点").width, 40.0);
    }

    #[test]
    fn lines_stack() {
        let m = GlyphAdvanceMeasure::default();
        let s = m.measure(20.0, "abcd\nx\n");
        assert_eq!(s.width, 40.0);
        assert_eq!(s.height, 75.0);
    }

    #[test]
    fn empty_node_is_padding_plus_one_line() {
        let s = node_size_for_text(&GlyphAdvanceMeasure::default(), "");
        assert_eq!(s.width, 40.0);
        assert_eq!(s.height, 65.0);
    }
}
