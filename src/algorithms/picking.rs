use crate::geometry::curve::{self_loop_arc, shifted_midpoint, SHIFT_DISTANCE};
use crate::geometry::line::Line;
use crate::geometry::rectangle::Rectangle;
use crate::geometry::shape::Shape;
use crate::geometry::vector::Vector2;
use crate::model::{LinkKey, NodeId};
use crate::text::link_label_size;
use crate::Graph;

/// Topmost visible node whose body contains `point` (later nodes paint on top).
pub fn node_at_impl(g: &Graph, point: Vector2) -> Option<NodeId> {
    g.iter_nodes()
        .filter(|(_, n)| !n.is_hidden_by_collapse && n.body_shape.is_contain_point(point))
        .map(|(id, _)| id)
        .last()
}

/// Visible nodes touched by a selection frame.
pub fn nodes_in_rect_impl(g: &Graph, rect: &Rectangle) -> Vec<NodeId> {
    g.iter_nodes()
        .filter(|(_, n)| !n.is_hidden_by_collapse && rect.is_collision(&n.body_shape, 0.0))
        .map(|(id, _)| id)
        .collect()
}

/// Hit body of a link: the centre line, the centre line pushed sideways for a
/// bidirectional pair, or the loop circle for a self-loop.
pub fn link_body_shape_impl(g: &Graph, key: LinkKey) -> Option<Shape> {
    let link = g.link(key.source, key.target)?;
    let s = g.node(key.source)?.body_shape;
    if key.is_self_loop() {
        return Some(Shape::Circle(self_loop_arc(&s).circle));
    }
    let t = g.node(key.target)?.body_shape;
    let line = Line::new(s.center(), t.center());
    if link.is_shifting {
        let offset = line.direction().normalize().rotate(90.0) * SHIFT_DISTANCE;
        return Some(Shape::Line(line.translate(offset)));
    }
    Some(Shape::Line(line))
}

/// Links a cut stroke crosses. Links touching hidden nodes are skipped.
pub fn links_intersecting_line_impl(g: &Graph, line: &Line) -> Vec<LinkKey> {
    g.links
        .keys()
        .copied()
        .filter(|&key| is_link_visible(g, key))
        .filter(|&key| link_body_shape_impl(g, key).map_or(false, |shape| shape.intersect_with_line(line)))
        .collect()
}

pub fn is_link_visible(g: &Graph, key: LinkKey) -> bool {
    let visible = |id| g.node(id).map_or(false, |n| !n.is_hidden_by_collapse);
    visible(key.source) && visible(key.target)
}

/// Label box: measured text plus padding, centred on the link midpoint (the
/// offset midpoint for shifted links, a point on the loop for self-loops).
pub fn link_text_rect_impl(g: &Graph, key: LinkKey) -> Option<Rectangle> {
    let link = g.link(key.source, key.target)?;
    let s = g.node(key.source)?.body_shape;
    let center = if key.is_self_loop() {
        let arc = self_loop_arc(&s);
        arc.circle.point_at_angle(arc.start_angle + arc.sweep_angle / 2.0)
    } else {
        let t = g.node(key.target)?.body_shape;
        if link.is_shifting {
            shifted_midpoint(&s, &t)
        } else {
            (s.center() + t.center()) / 2.0
        }
    };
    let size = link_label_size(g.measurer(), &link.inner_text);
    Some(Rectangle::from_center(center, size.width, size.height))
}
