//! Parabolas with a horizontal directrix below the focus.
//!
//! A site `f` and sweep line `y = d` define `y(x) = (x - f.x)² / (2 (f.y - d)) + (f.y + d) / 2`.
//! Foci on the directrix degenerate to a vertical ray; the breakpoint helpers
//! treat that case explicitly instead of dividing by zero.

use nalgebra::Vector2;

use super::cfg::EPS;

/// Height of the parabola with `focus` and directrix `y = directrix` at `x`.
///
/// The focal distance is clamped to `EPS`, so a focus on the directrix yields a
/// large finite value instead of infinity.
#[inline]
pub fn parabola_y(focus: Vector2<f64>, directrix: f64, x: f64) -> f64 {
    let dp = (2.0 * (focus.y - directrix)).max(EPS);
    let dx = x - focus.x;
    dx * dx / dp + 0.5 * (focus.y + directrix)
}

/// `(a, b, c)` with `y(x) = a x² + b x + c`.
#[inline]
fn coefficients(focus: Vector2<f64>, directrix: f64) -> (f64, f64, f64) {
    let dp = 2.0 * (focus.y - directrix);
    let a = 1.0 / dp;
    let b = -2.0 * focus.x / dp;
    let c = focus.x * focus.x / dp + 0.5 * (focus.y + directrix);
    (a, b, c)
}

/// x of the breakpoint where the arc of `left` meets the arc of `right`
/// (in beachline order) for the sweep at `directrix`.
///
/// The two parabolas meet twice. The lower focus has the narrower parabola,
/// which owns the interval between the roots; so a lower left focus ends at the
/// larger root and a lower right focus starts at the smaller one.
pub fn breakpoint_x(left: Vector2<f64>, right: Vector2<f64>, directrix: f64) -> f64 {
    if (left.y - right.y).abs() < EPS {
        return 0.5 * (left.x + right.x);
    }
    if (left.y - directrix).abs() < EPS {
        return left.x;
    }
    if (right.y - directrix).abs() < EPS {
        return right.x;
    }
    let (a1, b1, c1) = coefficients(left, directrix);
    let (a2, b2, c2) = coefficients(right, directrix);
    let a = a1 - a2;
    let b = b1 - b2;
    let c = c1 - c2;
    let disc = (b * b - 4.0 * a * c).max(0.0);
    // Numerically stable root pair.
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        return -b / (2.0 * a);
    }
    let x1 = q / a;
    let x2 = c / q;
    if left.y < right.y {
        x1.max(x2)
    } else {
        x1.min(x2)
    }
}

/// Lowest point of the circle centred at `center` passing through `site`.
#[inline]
pub fn circle_bottom(site: Vector2<f64>, center: Vector2<f64>) -> f64 {
    center.y - (site - center).norm()
}
