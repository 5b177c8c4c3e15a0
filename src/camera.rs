//! Viewport transform with inertial panning and eased zoom.
//!
//! ```text
//! view  = (world - location) * current_scale + (view_width, view_height) / 2
//! world = (view - (view_width, view_height) / 2) / current_scale + location
//! ```

use crate::effect::Effect;
use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::model::Color;
use crate::settings::Settings;

/// Drag grows as |v|^1.5: fast moves stop quickly, slow ones coast.
pub const FRICTION_EXPONENT: f64 = 1.5;
pub const SCALE_MAX: f64 = 5000.0;
pub const SCALE_MIN: f64 = 0.000_000_1;
/// Fraction of the remaining zoom gap closed per tick.
pub const SCALE_EASING: f64 = 0.1;

#[derive(Clone, Debug)]
pub struct Camera {
    /// World point shown at the centre of the view.
    pub location: Vector2,
    pub view_width: f64,
    pub view_height: f64,
    pub current_scale: f64,
    pub target_scale: f64,
    pub speed: Vector2,
    /// Held movement keys, each axis in [-1, 1].
    pub accelerate_commander: Vector2,
    pub is_scale_animation_open: bool,
    prepare_effects: Vec<Effect>,
}

impl Camera {
    pub fn new(location: Vector2, view_width: f64, view_height: f64) -> Self {
        Self {
            location,
            view_width,
            view_height,
            current_scale: 1.0,
            target_scale: 1.0,
            speed: Vector2::ZERO,
            accelerate_commander: Vector2::ZERO,
            is_scale_animation_open: true,
            prepare_effects: Vec::new(),
        }
    }

    /// Back to the origin at scale 1 (the current scale eases there).
    pub fn reset(&mut self) {
        self.target_scale = 1.0;
        self.location = Vector2::ZERO;
    }

    pub fn set_scale_animation(&mut self, is_open: bool) {
        self.is_scale_animation_open = is_open;
    }

    pub fn reset_view_size(&mut self, view_width: f64, view_height: f64) {
        self.view_width = view_width;
        self.view_height = view_height;
    }

    /// `direction` is a unit step such as (0, -1) for "up".
    pub fn press_move(&mut self, direction: Vector2) {
        self.accelerate_commander = (self.accelerate_commander + direction).limit_x(-1.0, 1.0).limit_y(-1.0, 1.0);
    }

    pub fn release_move(&mut self, direction: Vector2) {
        self.accelerate_commander = (self.accelerate_commander - direction).limit_x(-1.0, 1.0).limit_y(-1.0, 1.0);
    }

    pub fn zoom_in(&mut self, settings: &Settings) {
        if self.is_scale_animation_open {
            self.target_scale *= settings.camera_scale_exponent;
        } else {
            self.current_scale *= settings.camera_scale_exponent;
        }
    }

    pub fn zoom_out(&mut self, settings: &Settings) {
        if self.is_scale_animation_open {
            self.target_scale /= settings.camera_scale_exponent;
        } else {
            self.current_scale /= settings.camera_scale_exponent;
        }
    }

    /// Advance physics by one frame.
    pub fn tick(&mut self, settings: &Settings) {
        let friction = if self.speed.is_zero() {
            Vector2::ZERO
        } else {
            -self.speed.normalize() * (settings.camera_move_friction * self.speed.magnitude().powf(FRICTION_EXPONENT))
        };
        self.speed += self.accelerate_commander * (settings.camera_move_amplitude / self.current_scale);
        self.speed += friction;
        self.location += self.speed;

        if self.is_scale_animation_open {
            self.current_scale += (self.target_scale - self.current_scale) * SCALE_EASING;
        }

        if !self.is_finite() {
            log::warn!("camera state overflowed, resetting view");
            self.reset();
            self.current_scale = 1.0;
            self.speed = Vector2::ZERO;
            self.prepare_effects.push(Effect::view_flash(Color::WHITE));
            return;
        }

        // Zooming past either end wraps around to the other one instead of
        // clamping, with a flash.
        if self.current_scale > SCALE_MAX {
            log::warn!("scale {} above maximum, wrapping to minimum", self.current_scale);
            self.current_scale = SCALE_MIN * 2.0;
            self.target_scale = SCALE_MIN * 2.0;
            self.prepare_effects.push(Effect::view_flash(Color::WHITE));
        } else if self.current_scale < SCALE_MIN {
            log::warn!("scale {} below minimum, wrapping to maximum", self.current_scale);
            self.current_scale = SCALE_MAX - 1.0;
            self.target_scale = SCALE_MAX - 1.0;
            self.prepare_effects.push(Effect::view_flash(Color::WHITE));
        }
    }

    fn is_finite(&self) -> bool {
        self.location.is_finite()
            && self.speed.is_finite()
            && self.current_scale.is_finite()
            && self.target_scale.is_finite()
            && self.current_scale > 0.0
    }

    /// Effects raised since the last call (flashes on reset or wrap).
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.prepare_effects)
    }

    /// World-space rectangle currently visible.
    pub fn cover_world_rectangle(&self) -> Rectangle {
        let width = self.view_width / self.current_scale;
        let height = self.view_height / self.current_scale;
        Rectangle::new(self.location - Vector2::new(width / 2.0, height / 2.0), width, height)
    }

    fn half_view(&self) -> Vector2 {
        Vector2::new(self.view_width / 2.0, self.view_height / 2.0)
    }

    pub fn location_world2view(&self, world: Vector2) -> Vector2 {
        (world - self.location) * self.current_scale + self.half_view()
    }

    pub fn location_view2world(&self, view: Vector2) -> Vector2 {
        (view - self.half_view()) / self.current_scale + self.location
    }

    /// Same mapping as `location_world2view` as a 2x3 affine matrix
    /// `[a, b, c, d, e, f]` (canvas `setTransform` order).
    pub fn world2view_transform(&self) -> [f64; 6] {
        let s = self.current_scale;
        let offset = self.half_view() - self.location * s;
        [s, 0.0, 0.0, s, offset.x, offset.y]
    }
}
