//! Engine configuration passed explicitly into physics, collision and render.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Curve,
    Straight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera_move_friction: f64,
    pub camera_move_amplitude: f64,
    /// Zoom factor per step; must be > 1.
    pub camera_scale_exponent: f64,
    pub is_scale_animation_open: bool,
    pub is_enable_node_collision: bool,
    /// Gap below which two node bodies count as colliding.
    pub collision_margin: f64,
    pub history_max_size: usize,
    pub line_style: LineStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_move_friction: 0.1,
            camera_move_amplitude: 2.0,
            camera_scale_exponent: 1.1,
            is_scale_animation_open: true,
            is_enable_node_collision: true,
            collision_margin: 0.0,
            history_max_size: 20,
            line_style: LineStyle::Curve,
        }
    }
}

impl Settings {
    pub const MIN_HISTORY_SIZE: usize = 3;

    pub fn from_json_str(s: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Err(Error::InvalidSettings { message: message.into() });
        if !self.camera_scale_exponent.is_finite() || self.camera_scale_exponent <= 1.0 {
            return invalid("camera_scale_exponent must be a finite number > 1");
        }
        if !self.camera_move_friction.is_finite() || self.camera_move_friction < 0.0 {
            return invalid("camera_move_friction must be a finite number >= 0");
        }
        if !self.camera_move_amplitude.is_finite() {
            return invalid("camera_move_amplitude must be finite");
        }
        if !self.collision_margin.is_finite() || self.collision_margin < 0.0 {
            return invalid("collision_margin must be a finite number >= 0");
        }
        if self.history_max_size < Self::MIN_HISTORY_SIZE {
            return invalid("history_max_size must be at least 3");
        }
        Ok(())
    }
}
