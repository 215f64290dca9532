//! Generic inverse-bounding-box resolver.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use log::debug;

use crate::bounds::BoundedProjection;
use crate::error::ProjError;
use crate::geom::{GeoRect, Range, Rectangle};
use crate::proj::math::EPSILON;

/// Tunables for [`BoundsResolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolverOptions {
    /// Half-width of the neighbourhood of `x = 0` excluded from the edge
    /// values when a rectangle crosses the longitude cut.
    pub cut_epsilon: f64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            cut_epsilon: EPSILON,
        }
    }
}

impl ResolverOptions {
    pub fn validate(&self) -> Result<(), ProjError> {
        if !(self.cut_epsilon.is_finite() && self.cut_epsilon > 0.0) {
            return Err(ProjError::InvalidParameter(format!(
                "cut_epsilon must be positive and finite, got {}",
                self.cut_epsilon
            )));
        }
        Ok(())
    }
}

/// Computes sound geographic bounds of projected rectangles.
///
/// Holds no state beyond its options; the projection is passed per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsResolver {
    options: ResolverOptions,
}

impl BoundsResolver {
    pub fn new(options: ResolverOptions) -> Result<Self, ProjError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Geographic rectangle containing the inverse of every invertible
    /// point of `rect`.
    pub fn resolve<P: BoundedProjection + ?Sized>(&self, proj: &P, rect: &Rectangle) -> GeoRect {
        let r = rect.normalized();

        if r.is_point() {
            if let Ok(geo) = proj.inverse(r.x1, r.y1) {
                return GeoRect::point(geo);
            }
        }

        if r.x1 <= 0.0 && 0.0 <= r.x2 {
            let poles = proj.pole_containment(&r);
            if poles.both() {
                debug!("{r:?} contains both poles");
                return GeoRect::full();
            }
            if poles.any() {
                let phi = phi_range(proj, &r);
                debug!(
                    "{r:?} contains the {} pole",
                    if poles.north { "north" } else { "south" }
                );
                return if poles.north {
                    GeoRect::new(-PI, phi.min, PI, FRAC_PI_2)
                } else {
                    GeoRect::new(-PI, -FRAC_PI_2, PI, phi.max)
                };
            }
            if proj.crosses_cut(&r) {
                debug!("{r:?} crosses the longitude cut");
                let lambda = self.lambda_range_across_cut(proj, &r);
                return GeoRect::from_ranges(lambda, phi_range(proj, &r));
            }
        }

        GeoRect::from_ranges(lambda_range(proj, &r), phi_range(proj, &r))
    }

    /// Longitudes of a rectangle split by the cut: the western half wraps
    /// to just below `-pi`, the eastern half to just below `pi`, so the
    /// result runs east from the eastern minimum to the western maximum
    /// plus a full turn.
    fn lambda_range_across_cut<P: BoundedProjection + ?Sized>(
        &self,
        proj: &P,
        r: &Rectangle,
    ) -> Range {
        let eps = self.options.cut_epsilon;
        let ys = [r.y1, r.y2];
        let y_range = r.y_range();

        let minus = Range::merge(
            scan_x(proj, Range::new(r.x1, -eps), &ys, P::lambda_along_x),
            scan_y(proj, y_range, &[r.x1.min(-eps)], P::lambda_along_y),
        );
        let plus = Range::merge(
            scan_x(proj, Range::new(eps, r.x2), &ys, P::lambda_along_x),
            scan_y(proj, y_range, &[r.x2.max(eps)], P::lambda_along_y),
        );

        match (minus, plus) {
            (Some(minus), Some(plus)) => Range {
                min: plus.min,
                max: minus.max + TAU,
            },
            _ => Range::new(-PI, PI),
        }
    }
}

/// Union of per-bin bounds for `x` across `x_range` at each `y`.
fn scan_x<P, F>(proj: &P, x_range: Range, ys: &[f64], f: F) -> Option<Range>
where
    P: BoundedProjection + ?Sized,
    F: Fn(&P, i64, f64) -> Range,
{
    let (lo, hi) =
        proj.x_bin_window(proj.to_discrete(x_range.min), proj.to_discrete(x_range.max));
    let mut acc = None;
    for idx in lo..=hi {
        for &y in ys {
            acc = Range::merge(acc, Some(f(proj, idx, y)));
        }
    }
    acc
}

/// Union of per-bin bounds for `y` across `y_range` at each `x`.
fn scan_y<P, F>(proj: &P, y_range: Range, xs: &[f64], f: F) -> Option<Range>
where
    P: BoundedProjection + ?Sized,
    F: Fn(&P, i64, f64) -> Range,
{
    let (lo, hi) =
        proj.y_bin_window(proj.to_discrete(y_range.min), proj.to_discrete(y_range.max));
    let mut acc = None;
    for idx in lo..=hi {
        for &x in xs {
            acc = Range::merge(acc, Some(f(proj, idx, x)));
        }
    }
    acc
}

fn phi_range<P: BoundedProjection + ?Sized>(proj: &P, r: &Rectangle) -> Range {
    Range::merge(
        scan_x(proj, r.x_range(), &[r.y1, r.y2], P::phi_along_x),
        scan_y(proj, r.y_range(), &[r.x1, r.x2], P::phi_along_y),
    )
    .unwrap_or(Range::new(-FRAC_PI_2, FRAC_PI_2))
}

fn lambda_range<P: BoundedProjection + ?Sized>(proj: &P, r: &Rectangle) -> Range {
    Range::merge(
        scan_x(proj, r.x_range(), &[r.y1, r.y2], P::lambda_along_x),
        scan_y(proj, r.y_range(), &[r.x1, r.x2], P::lambda_along_y),
    )
    .unwrap_or(Range::new(-PI, PI))
}
