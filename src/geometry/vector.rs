//! Plain 2D vector used for world and view coordinates.

use super::tolerance::EPS_LEN;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `p1` to `p2`.
    pub fn from_two_points(p1: Vector2, p2: Vector2) -> Self {
        p2 - p1
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector has no direction; it normalizes to `ZERO` so that
    /// render and physics code never divides by zero.
    pub fn normalize(&self) -> Vector2 {
        let len = self.magnitude();
        if len <= EPS_LEN {
            return Vector2::ZERO;
        }
        Vector2::new(self.x / len, self.y / len)
    }

    /// Rotate counter-clockwise in a y-up frame (clockwise on screen, where y grows downward).
    pub fn rotate(&self, degrees: f64) -> Vector2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn cross(&self, other: Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_to(&self, other: Vector2) -> f64 {
        (other - *self).magnitude()
    }

    pub fn limit_x(&self, min: f64, max: f64) -> Vector2 {
        Vector2::new(self.x.max(min).min(max), self.y)
    }

    pub fn limit_y(&self, min: f64, max: f64) -> Vector2 {
        Vector2::new(self.x, self.y.max(min).min(max))
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Vector2 {
        Vector2::new(self.x.abs(), self.y.abs())
    }

    /// Component-wise product.
    pub fn scale_by(&self, other: Vector2) -> Vector2 {
        Vector2::new(self.x * other.x, self.y * other.y)
    }

    pub fn lerp(&self, other: Vector2, t: f64) -> Vector2 {
        *self + (other - *self) * t
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;
    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
