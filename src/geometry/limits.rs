// Centralized ingestion limits to harden against untrusted documents

// Scene size caps
pub const MAX_NODES: usize = 200_000;
pub const MAX_LINKS: usize = 400_000;
pub const MAX_CHILDREN_PER_NODE: usize = 100_000;

// Text caps (bytes)
pub const MAX_TEXT_LEN: usize = 1024 * 1024;

// Numeric bounds
pub const COORD_MIN: f64 = -1.0e12;
pub const COORD_MAX: f64 = 1.0e12;
pub const SIZE_MAX: f64 = 1.0e9;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

// Negative sizes are allowed; Rectangle::new flips them onto the origin.
#[inline]
pub fn in_size_bounds(w: f64) -> bool { w.is_finite() && w.abs() <= SIZE_MAX }
