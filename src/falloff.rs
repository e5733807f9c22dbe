//! Brush falloff and displacement-magnitude scaling.
//!
//! Every deformation operator weights its per-vertex displacement by a
//! smooth falloff of the normalized distance to the brush center, and
//! derives its base magnitude from the user intensity and the brush
//! radius. Both pieces live here so the operators share one definition.

/// Radius-proportional magnitude factor for brush and inflate strokes.
pub const BRUSH_RATE: f32 = 0.1;

/// Plane-relative magnitude factor for flatten strokes.
pub const FLATTEN_RATE: f32 = 0.3;

/// Smooth falloff weight for a normalized radial distance.
///
/// Evaluates `3t⁴ − 4t³ + 1`, which is `1` at the brush center, `0` at
/// the brush radius, and monotonically non-increasing in between.
///
/// Inputs outside `[0, 1]` are not clamped: selections are picked inside
/// the brush radius, so `t > 1` never reaches this function.
///
/// # Example
///
/// ```
/// use chisel::falloff::falloff;
///
/// assert_eq!(falloff(0.0), 1.0);
/// assert_eq!(falloff(1.0), 0.0);
/// ```
#[inline]
pub fn falloff(t: f32) -> f32 {
    let t2 = t * t;
    3.0 * t2 * t2 - 4.0 * t2 * t + 1.0
}

/// Displacement magnitude for radius-scaled tools (brush, inflate).
///
/// The base magnitude is `intensity × radius × 0.1`. When a `step_limit`
/// is present (adaptive topology mode) the magnitude is first clamped to
/// it, so a single step never displaces a vertex farther than the
/// remesher can absorb before the next refinement pass. The sign flip
/// for subtractive strokes happens after the clamp.
#[inline]
pub fn radius_scaled_magnitude(
    intensity: f32,
    radius: f32,
    step_limit: Option<f32>,
    negative: bool,
) -> f32 {
    let mut magnitude = intensity * radius * BRUSH_RATE;
    if let Some(limit) = step_limit {
        magnitude = magnitude.min(limit);
    }
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
