//! Indented outline text to a tree of nodes.
//!
//! ```text
//! A
//!     B
//!         C
//!     D
//! ```
//! Four spaces (or one tab) make one level. Every top-level line hangs off a
//! generated `Root` node.

use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::json::{BodyShapeDocument, GraphDocument, LinkDocument, NodeDocument};
use crate::text::{node_size_for_text, TextMeasure};

pub const ROOT_TEXT: &str = "Root";
pub const INDENT_X: f64 = 50.0;
pub const LINE_SPACING_Y: f64 = 150.0;

/// `(level, text)` of one outline line.
pub fn parse_line(line: &str) -> (usize, &str) {
    let mut columns = 0usize;
    let mut rest = line;
    for (i, ch) in line.char_indices() {
        match ch {
            ' ' => columns += 1,
            '\t' => columns += 4,
            _ => {
                rest = &line[i..];
                break;
            }
        }
    }
    (columns / 4, rest.trim())
}

fn node(measure: &dyn TextMeasure, location: Vector2, text: &str) -> NodeDocument {
    let size = node_size_for_text(measure, text);
    NodeDocument {
        body_shape: BodyShapeDocument::from_rectangle(&Rectangle::new(location, size.width, size.height)),
        inner_text: text.to_string(),
        details: String::new(),
        uuid: uuid::Uuid::new_v4().to_string(),
        children: Vec::new(),
        color: None,
        is_collapsed: false,
    }
}

pub fn import_indented_text_impl(measure: &dyn TextMeasure, text: &str) -> GraphDocument {
    let mut nodes = vec![node(measure, Vector2::ZERO, ROOT_TEXT)];
    let mut links = Vec::new();
    // (level, index into `nodes`); the root sits below every real level.
    let mut stack: Vec<(isize, usize)> = vec![(-1, 0)];

    for (i, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (level, name) = parse_line(line);
        let level = level as isize;
        let location = Vector2::new(level as f64 * INDENT_X, (i + 1) as f64 * LINE_SPACING_Y);
        let index = nodes.len();
        nodes.push(node(measure, location, name));

        while stack.len() > 1 && stack.last().map_or(false, |&(l, _)| level <= l) {
            stack.pop();
        }
        let parent = stack.last().map_or(0, |&(_, p)| p);
        stack.push((level, index));

        let child_uuid = nodes[index].uuid.clone();
        links.push(LinkDocument {
            source_node: nodes[parent].uuid.clone(),
            target_node: child_uuid.clone(),
            inner_text: String::new(),
        });
        nodes[parent].children.push(child_uuid);
    }
    GraphDocument { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::GlyphAdvanceMeasure;

    #[test]
    fn parses_spaces_and_tabs() {
        assert_eq!(parse_line("ABC"), (0, "ABC"));
        assert_eq!(parse_line("    ABC "), (1, "ABC"));
        assert_eq!(parse_line("\t\tABC"), (2, "ABC"));
    }

    #[test]
    fn builds_tree_under_root() {
        let doc = import_indented_text_impl(&GlyphAdvanceMeasure::default(), "A\n    B\n        C\n    D\nE\n");
        let names: Vec<&str> = doc.nodes.iter().map(|n| n.inner_text.as_str()).collect();
        assert_eq!(names, ["Root", "A", "B", "C", "D", "E"]);
        let uuid = |i: usize| doc.nodes[i].uuid.clone();
        assert_eq!(doc.nodes[0].children, vec![uuid(1), uuid(5)]);
        assert_eq!(doc.nodes[1].children, vec![uuid(2), uuid(4)]);
        assert_eq!(doc.nodes[2].children, vec![uuid(3)]);
        assert_eq!(doc.links.len(), 5);
    }
}
