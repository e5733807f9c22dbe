//! Small geometric helpers shared by the deformation operators.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector2, Vector3};

/// Signed angle from `a` to `b` in radians, in `(-π, π]`.
///
/// Positive when `b` lies counter-clockwise of `a`.
#[inline]
pub fn signed_angle_2d(a: &Vector2<f32>, b: &Vector2<f32>) -> f32 {
    a.perp(b).atan2(a.dot(b))
}

/// Rotate `point` about the axis through `center` by `angle` radians.
#[inline]
pub fn rotate_about(
    point: Point3<f32>,
    center: Point3<f32>,
    axis: &Unit<Vector3<f32>>,
    angle: f32,
) -> Point3<f32> {
    let rotation = UnitQuaternion::from_axis_angle(axis, angle);
    center + rotation * (point - center)
}
