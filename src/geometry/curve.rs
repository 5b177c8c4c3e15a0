//! Connector geometry between two node bodies.
//!
//! Every builder returns a [`Connection`]: a path (world coordinates) plus
//! the arrow head sitting on the target boundary. Zero-size or overlapping
//! bodies never panic; intersection lookups fall back to the body centre and
//! undefined normals collapse to the centre-to-centre direction.

use super::circle::Arc;
use super::line::Line;
use super::rectangle::Rectangle;
use super::vector::Vector2;
use crate::settings::LineStyle;
use serde::Serialize;

/// Arrow head length; the curved path stops this far in front of the tip.
pub const ARROW_SIZE: f64 = 15.0;
/// Half opening angle of the arrow head, degrees.
pub const ARROW_WING_DEGREES: f64 = 15.0;
/// Perpendicular offset of the midpoint for bidirectional pairs.
pub const SHIFT_DISTANCE: f64 = 50.0;
/// Self-loop arc starts this many degrees past the node edge.
pub const SELF_LOOP_SEAM_DEGREES: f64 = 1.0;
pub const SELF_LOOP_SWEEP_DEGREES: f64 = 270.0;
pub const SELF_LOOP_MIN_RADIUS: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { to: Vector2 },
    LineTo { to: Vector2 },
    CubicTo { ctrl1: Vector2, ctrl2: Vector2, to: Vector2 },
    /// Circular arc; angles in degrees from +x towards +y.
    Arc { center: Vector2, radius: f64, start_angle: f64, sweep_angle: f64 },
}

impl PathSegment {
    /// Map through a similarity transform given as a point mapping plus its
    /// uniform scale.
    pub fn map<F: Fn(Vector2) -> Vector2>(&self, f: F, scale: f64) -> PathSegment {
        match *self {
            PathSegment::MoveTo { to } => PathSegment::MoveTo { to: f(to) },
            PathSegment::LineTo { to } => PathSegment::LineTo { to: f(to) },
            PathSegment::CubicTo { ctrl1, ctrl2, to } => PathSegment::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathSegment::Arc { center, radius, start_angle, sweep_angle } => PathSegment::Arc {
                center: f(center),
                radius: radius * scale,
                start_angle,
                sweep_angle,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arrow {
    pub tip: Vector2,
    /// Unit direction the arrow points in.
    pub direction: Vector2,
    pub size: f64,
}

impl Arrow {
    pub fn new(tip: Vector2, direction: Vector2) -> Self {
        Self { tip, direction: direction.normalize(), size: ARROW_SIZE }
    }

    /// Closed outline: tip, right wing, notch, left wing.
    pub fn polygon(&self) -> [Vector2; 4] {
        let back = -self.direction * self.size;
        [
            self.tip,
            self.tip + back.rotate(ARROW_WING_DEGREES),
            self.tip - self.direction * (self.size * 0.5),
            self.tip + back.rotate(-ARROW_WING_DEGREES),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Connection {
    pub segments: Vec<PathSegment>,
    pub arrow: Arrow,
}

impl Connection {
    /// Every point the path passes through or is steered by.
    pub fn control_points(&self) -> Vec<Vector2> {
        let mut out = self.arrow.polygon().to_vec();
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo { to } | PathSegment::LineTo { to } => out.push(to),
                PathSegment::CubicTo { ctrl1, ctrl2, to } => out.extend([ctrl1, ctrl2, to]),
                PathSegment::Arc { center, radius, .. } => {
                    out.push(center - Vector2::new(radius, radius));
                    out.push(center + Vector2::new(radius, radius));
                }
            }
        }
        out
    }
}

// Where `line` leaves `rect`, and the outward normal there.
fn boundary_anchor(rect: &Rectangle, line: &Line) -> (Vector2, Vector2) {
    let p = rect.get_line_intersection_point(line);
    (p, rect.get_normal_from_center_to_edge(p))
}

fn or_fallback(normal: Vector2, fallback: Vector2) -> Vector2 {
    if normal.is_zero() {
        fallback.normalize()
    } else {
        normal
    }
}

/// Cubic Bezier between two distinct bodies.
///
/// The control points leave each boundary point along its edge normal by the
/// component-wise half distance between the boundary points, so the curve
/// meets both bodies perpendicularly and bows more the further apart they are.
pub fn connect_curve(source: &Rectangle, target: &Rectangle) -> Connection {
    let line = Line::new(source.center(), target.center());
    let (start, start_normal) = boundary_anchor(source, &line);
    let (tip, end_normal) = boundary_anchor(target, &line);
    let dir = line.direction();
    let start_normal = or_fallback(start_normal, dir);
    let end_normal = or_fallback(end_normal, -dir);

    let end = tip + end_normal * ARROW_SIZE;
    let half = ((tip - start) / 2.0).abs();
    let ctrl1 = start + start_normal.scale_by(half);
    let ctrl2 = end + end_normal.scale_by(half);
    Connection {
        segments: vec![
            PathSegment::MoveTo { to: start },
            PathSegment::CubicTo { ctrl1, ctrl2, to: end },
        ],
        arrow: Arrow::new(tip, -end_normal),
    }
}

/// Midpoint of the centre line pushed sideways (clockwise on screen) by
/// [`SHIFT_DISTANCE`]. The reverse link gets the opposite side.
pub fn shifted_midpoint(source: &Rectangle, target: &Rectangle) -> Vector2 {
    let (s, t) = (source.center(), target.center());
    (s + t) / 2.0 + (t - s).normalize().rotate(90.0) * SHIFT_DISTANCE
}

/// Curve for one link of a bidirectional pair. Both ends are anchored on the
/// lines through the offset midpoint instead of the centre line.
pub fn connect_shifted_curve(source: &Rectangle, target: &Rectangle) -> Connection {
    let (s, t) = (source.center(), target.center());
    let offset = (t - s).normalize().rotate(90.0) * SHIFT_DISTANCE;
    let mid = (s + t) / 2.0 + offset;
    let (start, _) = boundary_anchor(source, &Line::new(s, mid));
    let in_line = Line::new(mid, t);
    let (tip, end_normal) = boundary_anchor(target, &in_line);
    let end_normal = or_fallback(end_normal, -in_line.direction());

    let end = tip + end_normal * ARROW_SIZE;
    // A cubic with both handles displaced by `o` peaks at 3/4 `o` from its chord.
    let bow = offset * (4.0 / 3.0);
    Connection {
        segments: vec![
            PathSegment::MoveTo { to: start },
            PathSegment::CubicTo { ctrl1: start + bow, ctrl2: end + bow, to: end },
        ],
        arrow: Arrow::new(tip, -end_normal),
    }
}

/// 270 degree loop around the top-left corner of the body, ending on the
/// top edge with the arrow pointing into the node.
pub fn connect_self_loop(body: &Rectangle) -> Connection {
    let arc = self_loop_arc(body);
    Connection {
        segments: vec![
            PathSegment::MoveTo { to: arc.start_point() },
            PathSegment::Arc {
                center: arc.circle.center,
                radius: arc.circle.radius,
                start_angle: arc.start_angle,
                sweep_angle: arc.sweep_angle,
            },
        ],
        arrow: Arrow::new(arc.end_point(), arc.end_tangent()),
    }
}

pub fn self_loop_arc(body: &Rectangle) -> Arc {
    let radius = (body.height / 2.0).max(SELF_LOOP_MIN_RADIUS);
    Arc::new(body.left_top(), radius, 90.0 + SELF_LOOP_SEAM_DEGREES, SELF_LOOP_SWEEP_DEGREES)
}

/// Straight segment between the two boundary points.
pub fn connect_straight(source: &Rectangle, target: &Rectangle) -> Connection {
    let line = Line::new(source.center(), target.center());
    let start = source.get_line_intersection_point(&line);
    let tip = target.get_line_intersection_point(&line);
    Connection {
        segments: vec![PathSegment::MoveTo { to: start }, PathSegment::LineTo { to: tip }],
        arrow: Arrow::new(tip, tip - start),
    }
}

/// Straight connector broken around an invisible `relay` box (the label
/// area). The arrow sits only on the second leg.
pub fn connect_straight_relay(source: &Rectangle, relay: &Rectangle, target: &Rectangle) -> Connection {
    let (s, r, t) = (source.center(), relay.center(), target.center());
    let first = Line::new(s, r);
    let second = Line::new(r, t);
    let start = source.get_line_intersection_point(&first);
    let relay_in = relay.get_line_intersection_point(&first);
    let relay_out = relay.get_line_intersection_point(&second);
    let tip = target.get_line_intersection_point(&second);
    Connection {
        segments: vec![
            PathSegment::MoveTo { to: start },
            PathSegment::LineTo { to: relay_in },
            PathSegment::MoveTo { to: relay_out },
            PathSegment::LineTo { to: tip },
        ],
        arrow: Arrow::new(tip, tip - relay_out),
    }
}

/// Picks the connector for one link.
///
/// `label` is the label box when the link carries text; in straight mode the
/// path is broken around it, and shifted straight links are routed through a
/// point-sized relay at the offset midpoint.
pub fn connect(
    source: &Rectangle,
    target: &Rectangle,
    is_self_loop: bool,
    is_shifting: bool,
    style: LineStyle,
    label: Option<&Rectangle>,
) -> Connection {
    if is_self_loop {
        return connect_self_loop(source);
    }
    match style {
        LineStyle::Curve if is_shifting => connect_shifted_curve(source, target),
        LineStyle::Curve => connect_curve(source, target),
        LineStyle::Straight => match label {
            Some(relay) => connect_straight_relay(source, relay, target),
            None if is_shifting => {
                let relay = Rectangle::from_center(shifted_midpoint(source, target), 1.0, 1.0);
                connect_straight_relay(source, &relay, target)
            }
            None => connect_straight(source, target),
        },
    }
}
