use nalgebra::Vector2;

use super::cfg::EPS;
use super::types::{Ray, Side};

#[inline]
fn perp(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
fn cross(begin: Vector2<f64>, end: Vector2<f64>, point: Vector2<f64>) -> f64 {
    perp(end - begin, point - begin)
}

/// Unsigned cross product of `end - begin` and `point - begin`.
///
/// Proportional to the distance of `point` from the line; only meaningful for
/// relative comparisons against the same segment.
#[inline]
pub fn distance(begin: Vector2<f64>, end: Vector2<f64>, point: Vector2<f64>) -> f64 {
    cross(begin, end, point).abs()
}

/// Orientation of `point` relative to the directed line `begin → end`.
/// Cross products below `EPS` in magnitude count as `OnLine`.
pub fn side(begin: Vector2<f64>, end: Vector2<f64>, point: Vector2<f64>) -> Side {
    if distance(begin, end, point) < EPS {
        return Side::OnLine;
    }
    if cross(begin, end, point) > 0.0 {
        Side::Left
    } else {
        Side::Right
    }
}

/// Line parameters `(t, s)` with `a.at(t) == b.at(s)`.
///
/// Returns `None` for (nearly) parallel directions. The caller decides which
/// signs it accepts, so both half-lines and full lines can use this.
pub fn ray_params(a: &Ray, b: &Ray) -> Option<(f64, f64)> {
    let denom = perp(a.direction, b.direction);
    let scale = a.direction.norm() * b.direction.norm();
    if !(scale.is_finite()) || denom.abs() <= EPS * scale {
        return None;
    }
    let w = b.start - a.start;
    let t = perp(w, b.direction) / denom;
    let s = perp(w, a.direction) / denom;
    Some((t, s))
}

/// Meeting point of two half-lines, if both parameters are non-negative
/// within `EPS`.
pub fn ray_intersection(a: &Ray, b: &Ray) -> Option<Vector2<f64>> {
    let (t, s) = ray_params(a, b)?;
    (t >= -EPS && s >= -EPS).then(|| a.at(t))
}
