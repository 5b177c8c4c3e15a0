//! One frame of the editor as a flat list of draw primitives in view
//! (pixel) coordinates. The host replays them on a canvas; [`crate::svg`]
//! turns them into a standalone SVG document.

use crate::algorithms::picking::{is_link_visible, link_text_rect_impl};
use crate::camera::Camera;
use crate::effect::{Effect, EffectKind};
use crate::geometry::curve::{connect, PathSegment};
use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::model::Color;
use crate::settings::Settings;
use crate::text::{node_size_for_text, LINK_FONT_SIZE, LINK_TEXT_PADDING_X, LINK_TEXT_PADDING_Y, NODE_DETAILS_FONT_SIZE, NODE_FONT_SIZE, NODE_PADDING};
use crate::{Graph, GROW_NODE_TEXT};
use serde::Serialize;

pub const NODE_CORNER_RADIUS: f64 = 8.0;
pub const NODE_BORDER_WIDTH: f64 = 2.0;
pub const LINK_WIDTH: f64 = 2.0;
/// Gap between the cursor frame and the node it surrounds.
pub const CURSOR_MARGIN: f64 = 10.0;
pub const CUTTING_WIDTH: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum PaintCommand {
    Rect { rect: Rectangle, fill: Color, stroke: Color, stroke_width: f64, radius: f64 },
    Line { from: Vector2, to: Vector2, color: Color, width: f64 },
    Circle { center: Vector2, radius: f64, fill: Color, stroke: Color, stroke_width: f64 },
    Path { segments: Vec<PathSegment>, color: Color, width: f64 },
    Polygon { points: Vec<Vector2>, fill: Color },
    /// `location` is the top-left corner of the first line.
    Text { location: Vector2, text: String, size: f64, color: Color },
}

/// Colours of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderStyle {
    pub background: Color,
    pub node_fill: Color,
    pub node_border: Color,
    pub node_text: Color,
    pub selected_border: Color,
    pub details_fill: Color,
    pub details_text: Color,
    pub link: Color,
    pub link_text: Color,
    pub cursor: Color,
    pub grow_preview: Color,
    pub effect: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::rgba(30, 30, 30, 255),
            node_fill: Color::rgba(45, 45, 45, 255),
            node_border: Color::rgba(204, 204, 204, 255),
            node_text: Color::WHITE,
            selected_border: Color::rgba(34, 217, 110, 255),
            details_fill: Color::rgba(20, 20, 20, 230),
            details_text: Color::rgba(200, 200, 200, 255),
            link: Color::rgba(204, 204, 204, 255),
            link_text: Color::WHITE,
            cursor: Color::rgba(255, 255, 0, 255),
            grow_preview: Color::rgba(255, 255, 255, 128),
            effect: Color::rgba(255, 0, 0, 255),
        }
    }
}

fn fade(color: Color, effect: &Effect) -> Color {
    let alpha = color.a as f64 * (1.0 - effect.finish_rate());
    color.with_alpha(alpha.round().clamp(0.0, 255.0) as u8)
}

struct View<'a> {
    camera: &'a Camera,
}

impl View<'_> {
    fn point(&self, p: Vector2) -> Vector2 {
        self.camera.location_world2view(p)
    }

    fn len(&self, l: f64) -> f64 {
        l * self.camera.current_scale
    }

    fn rect(&self, r: &Rectangle) -> Rectangle {
        Rectangle::new(self.point(r.location_left_top), self.len(r.width), self.len(r.height))
    }
}

/// Draw list for the current state, back to front: background, links and
/// their labels, nodes, cursor frame, grow preview, effects.
///
/// Nodes whose body lies outside the camera's world rectangle are culled, as
/// are links whose two bodies both lie outside it. Nodes hidden by a collapsed
/// ancestor and links touching them are never painted.
pub fn paint_scene(graph: &Graph, camera: &Camera, settings: &Settings, style: &RenderStyle, effects: &[Effect]) -> Vec<PaintCommand> {
    let view = View { camera };
    let cover = camera.cover_world_rectangle();
    let mut out = Vec::new();

    out.push(PaintCommand::Rect {
        rect: Rectangle::new(Vector2::ZERO, camera.view_width, camera.view_height),
        fill: style.background,
        stroke: Color::TRANSPARENT,
        stroke_width: 0.0,
        radius: 0.0,
    });

    for (&key, link) in &graph.links {
        if !is_link_visible(graph, key) {
            continue;
        }
        let (Some(s), Some(t)) = (graph.node(key.source), graph.node(key.target)) else { continue };
        let (s, t) = (s.body_shape, t.body_shape);
        if !cover.is_collision(&s, 0.0) && !cover.is_collision(&t, 0.0) {
            continue;
        }
        let label = if link.inner_text.is_empty() { None } else { link_text_rect_impl(graph, key) };
        let conn = connect(&s, &t, key.is_self_loop(), link.is_shifting, settings.line_style, label.as_ref());
        out.push(PaintCommand::Path {
            segments: conn.segments.iter().map(|seg| seg.map(|p| view.point(p), camera.current_scale)).collect(),
            color: style.link,
            width: view.len(LINK_WIDTH),
        });
        out.push(PaintCommand::Polygon {
            points: conn.arrow.polygon().iter().map(|&p| view.point(p)).collect(),
            fill: style.link,
        });
        if let Some(label) = label {
            out.push(PaintCommand::Rect {
                rect: view.rect(&label),
                fill: style.background,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
                radius: view.len(NODE_CORNER_RADIUS),
            });
            out.push(PaintCommand::Text {
                location: view.point(label.location_left_top + Vector2::new(LINK_TEXT_PADDING_X, LINK_TEXT_PADDING_Y)),
                text: link.inner_text.clone(),
                size: view.len(LINK_FONT_SIZE),
                color: style.link_text,
            });
        }
    }

    for (_, node) in graph.iter_nodes() {
        if node.is_hidden_by_collapse || !cover.is_collision(&node.body_shape, 0.0) {
            continue;
        }
        let body = node.body_shape;
        out.push(PaintCommand::Rect {
            rect: view.rect(&body),
            fill: node.color.unwrap_or(style.node_fill),
            stroke: if node.is_selected { style.selected_border } else { style.node_border },
            stroke_width: view.len(NODE_BORDER_WIDTH),
            radius: view.len(NODE_CORNER_RADIUS),
        });
        out.push(PaintCommand::Text {
            location: view.point(body.location_left_top + Vector2::new(NODE_PADDING, NODE_PADDING)),
            text: node.inner_text.clone(),
            size: view.len(NODE_FONT_SIZE),
            color: style.node_text,
        });
        if node.is_collapsed {
            out.push(PaintCommand::Circle {
                center: view.point(body.right_center()),
                radius: view.len(NODE_PADDING / 4.0),
                fill: style.node_border,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            });
        }
        if node.is_detail_show && !node.details.is_empty() {
            let size = graph.measurer().measure(NODE_DETAILS_FONT_SIZE, &node.details);
            let panel = Rectangle::new(body.left_bottom(), size.width + 2.0 * NODE_PADDING, size.height + 2.0 * NODE_PADDING);
            out.push(PaintCommand::Rect {
                rect: view.rect(&panel),
                fill: style.details_fill,
                stroke: style.node_border,
                stroke_width: view.len(1.0),
                radius: 0.0,
            });
            out.push(PaintCommand::Text {
                location: view.point(panel.location_left_top + Vector2::new(NODE_PADDING, NODE_PADDING)),
                text: node.details.clone(),
                size: view.len(NODE_DETAILS_FONT_SIZE),
                color: style.details_text,
            });
        }
    }

    if let Some(cursor) = graph.cursor_node().and_then(|id| graph.node(id)) {
        let frame = cursor.body_shape.expand_from_center(CURSOR_MARGIN, CURSOR_MARGIN);
        out.push(PaintCommand::Rect {
            rect: view.rect(&frame),
            fill: Color::TRANSPARENT,
            stroke: style.cursor,
            stroke_width: view.len(NODE_BORDER_WIDTH),
            radius: view.len(NODE_CORNER_RADIUS),
        });
        if let Some(location) = graph.grow_node_location() {
            let size = node_size_for_text(graph.measurer(), GROW_NODE_TEXT);
            out.push(PaintCommand::Line {
                from: view.point(cursor.body_shape.center()),
                to: view.point(location),
                color: style.grow_preview,
                width: view.len(LINK_WIDTH),
            });
            out.push(PaintCommand::Rect {
                rect: view.rect(&Rectangle::from_center(location, size.width, size.height)),
                fill: Color::TRANSPARENT,
                stroke: style.grow_preview,
                stroke_width: view.len(NODE_BORDER_WIDTH),
                radius: view.len(NODE_CORNER_RADIUS),
            });
        }
    }

    for effect in effects {
        match &effect.kind {
            EffectKind::ViewFlash { color } => out.push(PaintCommand::Rect {
                rect: Rectangle::new(Vector2::ZERO, camera.view_width, camera.view_height),
                fill: fade(*color, effect),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
                radius: 0.0,
            }),
            EffectKind::CuttingFlash { line } => out.push(PaintCommand::Line {
                from: view.point(line.start.lerp(line.end, effect.finish_rate())),
                to: view.point(line.end),
                color: fade(style.effect, effect),
                width: CUTTING_WIDTH * (1.0 - effect.finish_rate()),
            }),
            EffectKind::RectangleFlash { rect } => out.push(PaintCommand::Rect {
                rect: view.rect(rect),
                fill: Color::TRANSPARENT,
                stroke: fade(style.effect, effect),
                stroke_width: NODE_BORDER_WIDTH,
                radius: view.len(NODE_CORNER_RADIUS),
            }),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_rects(cmds: &[PaintCommand]) -> usize {
        cmds.iter().filter(|c| matches!(c, PaintCommand::Rect { .. })).count()
    }

    #[test]
    fn offscreen_nodes_are_culled() {
        let mut g = Graph::new();
        g.add_node(Vector2::ZERO);
        g.add_node(Vector2::new(10_000.0, 0.0));
        let camera = Camera::new(Vector2::ZERO, 800.0, 600.0);
        let cmds = paint_scene(&g, &camera, &Settings::default(), &RenderStyle::default(), &[]);
        // background + one node
        assert_eq!(count_rects(&cmds), 2);
    }

    #[test]
    fn view_flash_fades_out() {
        let mut effect = Effect::view_flash(Color::WHITE);
        for _ in 0..effect.duration {
            effect.tick();
        }
        let camera = Camera::new(Vector2::ZERO, 100.0, 100.0);
        let cmds = paint_scene(&Graph::new(), &camera, &Settings::default(), &RenderStyle::default(), &[effect]);
        match cmds.last() {
            Some(PaintCommand::Rect { fill, .. }) => assert_eq!(fill.a, 0),
            other => panic!("unexpected {:?}", other),
        }
    }
}
