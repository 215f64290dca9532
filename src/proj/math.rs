//! Shared scalar helpers for the spherical projections.

use std::f64::consts::{PI, TAU};

use crate::geom::Range;

/// Tolerance used for singularity tests (center, antipode, polar centers).
pub const EPSILON: f64 = 1.0e-7;

pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Clamp to `[-1, 1]` before `asin`/`acos` to absorb rounding error.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    v.clamp(-1.0, 1.0)
}

/// Wrap a longitude into `[-pi, pi)`.
#[inline]
pub fn normalize_lambda(lambda: f64) -> f64 {
    if (-PI..PI).contains(&lambda) {
        return lambda;
    }
    lambda - TAU * ((lambda + PI) / TAU).floor()
}

/// True when a center latitude is close enough to a pole that the polar
/// forms of the azimuthal formulas apply.
#[inline]
pub fn is_polar(phi0: f64) -> bool {
    phi0.abs() > std::f64::consts::FRAC_PI_2 - EPSILON
}

/// Range of `atan2(y, x)` over the box `y_range x x_range`.
///
/// When the box straddles the negative x axis the result is expressed as a
/// contiguous interval that may extend past `pi` (or below `-pi`). A box
/// containing the origin yields the full circle.
pub fn atan2_range(y_range: Range, x_range: Range) -> Range {
    // -0.0 + 0.0 == +0.0, so a zero bound always sits on the upper side
    let ymin = y_range.min + 0.0;
    let ymax = y_range.max + 0.0;
    let xmin = x_range.min + 0.0;
    let xmax = x_range.max + 0.0;

    // upper half plane
    if 0.0 <= ymin {
        if 0.0 < xmin {
            return Range::new(ymin.atan2(xmax), ymax.atan2(xmin));
        }
        if xmax < 0.0 {
            return Range::new(ymax.atan2(xmax), ymin.atan2(xmin));
        }
        return Range::new(ymin.atan2(xmax), ymin.atan2(xmin));
    }

    // lower half plane
    if ymax < 0.0 {
        if 0.0 < xmin {
            return Range::new(ymin.atan2(xmin), ymax.atan2(xmax));
        }
        if xmax < 0.0 {
            return Range::new(ymax.atan2(xmin), ymin.atan2(xmax));
        }
        return Range::new(ymax.atan2(xmin), ymax.atan2(xmax));
    }

    // straddles the x axis without containing the origin
    if 0.0 < xmin {
        return Range::new(ymin.atan2(xmin), ymax.atan2(xmin));
    }
    if xmax < 0.0 {
        let t1 = ymax.atan2(xmax);
        let t2 = ymin.atan2(xmax);
        if PI <= t1 {
            return Range::new(t1 - TAU, t2);
        }
        return Range::new(t1, t2 + TAU);
    }

    Range::new(-PI, PI)
}
