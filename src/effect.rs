//! Short-lived visual feedback, aged once per frame.

use crate::geometry::line::Line;
use crate::geometry::rectangle::Rectangle;
use crate::geometry::vector::Vector2;
use crate::model::Color;
use serde::Serialize;

/// Frames a full-view flash lasts after a camera reset or scale wrap.
pub const VIEW_FLASH_FRAMES: u32 = 15;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum EffectKind {
    /// Whole viewport tinted with `color`, fading out.
    ViewFlash { color: Color },
    /// A cut gesture's blade; shrinks towards `line.end`.
    CuttingFlash { line: Line },
    /// Outline that grows by one unit on every side per frame.
    RectangleFlash { rect: Rectangle },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub duration: u32,
    pub elapsed: u32,
}

impl Effect {
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self { kind, duration: duration.max(1), elapsed: 0 }
    }

    pub fn view_flash(color: Color) -> Self {
        Self::new(EffectKind::ViewFlash { color }, VIEW_FLASH_FRAMES)
    }

    /// Progress in `[0, 1]`; renderers fade alpha by `1 - finish_rate`.
    pub fn finish_rate(&self) -> f64 {
        (self.elapsed as f64 / self.duration as f64).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
        if let EffectKind::RectangleFlash { rect } = &mut self.kind {
            *rect = Rectangle::new(rect.location_left_top - Vector2::new(1.0, 1.0), rect.width + 2.0, rect.height + 2.0);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EffectManager {
    effects: Vec<Effect>,
}

impl EffectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn extend<I: IntoIterator<Item = Effect>>(&mut self, effects: I) {
        self.effects.extend(effects);
    }

    /// Age every effect by one frame and drop the finished ones.
    pub fn tick(&mut self) {
        for e in &mut self.effects {
            e.tick();
        }
        self.effects.retain(|e| !e.is_finished());
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
