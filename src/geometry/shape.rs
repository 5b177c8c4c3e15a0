use super::circle::Circle;
use super::line::Line;
use super::rectangle::Rectangle;
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Collision/hit-test body of anything on the stage.
///
/// Nodes use `Rectangle`; links use `Line` (centre to centre, possibly
/// shifted) or `Circle` for self-loops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Line(Line),
}

impl Shape {
    pub fn center(&self) -> Vector2 {
        match self {
            Shape::Rectangle(r) => r.center(),
            Shape::Circle(c) => c.center,
            Shape::Line(l) => l.midpoint(),
        }
    }

    pub fn contains_point(&self, p: Vector2) -> bool {
        match self {
            Shape::Rectangle(r) => r.is_contain_point(p),
            Shape::Circle(c) => c.contains_point(p),
            Shape::Line(_) => false,
        }
    }

    pub fn intersect_with_line(&self, line: &Line) -> bool {
        match self {
            Shape::Rectangle(r) => r.is_intersect_with_line(line),
            Shape::Circle(c) => c.intersect_with_line(line),
            Shape::Line(l) => l.is_intersecting(line),
        }
    }

    /// Outward normal at a boundary point, zero when undefined.
    pub fn get_normal_at_point(&self, p: Vector2) -> Vector2 {
        match self {
            Shape::Rectangle(r) => r.get_normal_from_center_to_edge(p),
            Shape::Circle(c) => (p - c.center).normalize(),
            Shape::Line(l) => l.direction().normalize().rotate(90.0),
        }
    }

    pub fn bounding_rectangle(&self) -> Rectangle {
        match self {
            Shape::Rectangle(r) => *r,
            Shape::Circle(c) => Rectangle::from_center(c.center, c.radius * 2.0, c.radius * 2.0),
            Shape::Line(l) => Rectangle::from_two_points(l.start, l.end),
        }
    }
}
