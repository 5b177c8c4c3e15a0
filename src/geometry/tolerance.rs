// Centralized tolerances for robust geometry

pub const EPS_POS: f64 = 1e-6;            // point-on-edge threshold (world units)
pub const EPS_LEN: f64 = 1e-12;           // zero-length vector threshold
pub const EPS_DENOM: f64 = 1e-12;         // denominator guard for parametric solves

#[inline] pub fn clamp01(x: f64) -> f64 { x.max(0.0).min(1.0) }

/// Tolerance scaled to the magnitude of the coordinates being compared, so
/// edge tests keep working far away from the origin.
#[inline]
pub fn scaled_eps(a: f64, b: f64) -> f64 {
    EPS_POS * 1.0f64.max(a.abs()).max(b.abs())
}
