//! Precondition checks at the library boundary.

use std::fmt;

use nalgebra::Vector2;

use super::types::{Bounds, Site, SiteId};

/// Rejected sweep inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Fewer than two sites.
    TooFewSites { got: usize },
    /// A coordinate is NaN or infinite.
    NonFiniteSite { index: usize },
    /// Two sites closer than the tolerance in both coordinates.
    CoincidentSites { first: usize, second: usize },
    /// Box extents must be finite and positive.
    InvalidBounds { width: f64, height: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::TooFewSites { got } => {
                write!(f, "need at least 2 sites, got {got}")
            }
            InputError::NonFiniteSite { index } => {
                write!(f, "site {index} has a non-finite coordinate")
            }
            InputError::CoincidentSites { first, second } => {
                write!(f, "sites {first} and {second} coincide")
            }
            InputError::InvalidBounds { width, height } => {
                write!(f, "bounds must be positive and finite, got {width} x {height}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Validate the box and the points and tag each point with its input index.
pub fn validate(points: &[Vector2<f64>], bounds: Bounds, eps: f64) -> Result<Vec<Site>, InputError> {
    let Bounds { width, height } = bounds;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(InputError::InvalidBounds { width, height });
    }
    if points.len() < 2 {
        return Err(InputError::TooFewSites { got: points.len() });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(InputError::NonFiniteSite { index });
    }
    if let Some((first, second)) = find_coincident(points, eps) {
        return Err(InputError::CoincidentSites { first, second });
    }
    Ok(points
        .iter()
        .enumerate()
        .map(|(i, &pos)| Site {
            index: SiteId(i),
            pos,
        })
        .collect())
}

/// First pair (by sorted x) of points within `eps` in both coordinates.
fn find_coincident(points: &[Vector2<f64>], eps: f64) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x));
    for (k, &i) in order.iter().enumerate() {
        for &j in &order[k + 1..] {
            if points[j].x - points[i].x >= eps {
                break;
            }
            if (points[j].y - points[i].y).abs() < eps {
                return Some((i.min(j), i.max(j)));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    const B: Bounds = Bounds {
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn accepts_distinct_sites_in_order() {
        let sites = validate(&[vector![1.0, 2.0], vector![3.0, 4.0]], B, 1e-9).unwrap();
        assert_eq!(sites[1].index, SiteId(1));
        assert_eq!(sites[1].pos, vector![3.0, 4.0]);
    }

    #[test]
    fn rejects_each_precondition() {
        assert_eq!(
            validate(&[vector![1.0, 2.0]], B, 1e-9),
            Err(InputError::TooFewSites { got: 1 })
        );
        assert_eq!(
            validate(&[vector![1.0, 2.0], vector![f64::NAN, 0.0]], B, 1e-9),
            Err(InputError::NonFiniteSite { index: 1 })
        );
        assert_eq!(
            validate(
                &[vector![5.0, 5.0], vector![0.0, 0.0], vector![5.0, 5.0 + 1e-12]],
                B,
                1e-9
            ),
            Err(InputError::CoincidentSites { first: 0, second: 2 })
        );
        assert!(matches!(
            validate(&[vector![0.0, 0.0], vector![1.0, 1.0]], Bounds::new(0.0, 1.0), 1e-9),
            Err(InputError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn same_x_different_y_is_fine() {
        let pts = [vector![5.0, 0.0], vector![5.0, 1.0], vector![5.0, 2.0]];
        assert!(validate(&pts, B, 1e-9).is_ok());
    }
}
