//! Spherical Transverse Mercator projection.
//!
//! `x = atanh(cos(phi) sin(lambda - lam0))` grows without bound towards the
//! two points 90 degrees from the central meridian on the equator, while `y`
//! is periodic with period `2 pi`; the forward projection folds it into
//! `[-pi, pi)`. Pole images sit on `x = 0` at `y = +-pi/2 - phi0 + 2 k pi`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::bounds::{BoundedProjection, PoleContainment};
use crate::discrete::PeriodicTable;
use crate::error::ProjError;
use crate::geom::{GeoCoord, Point, Range, Rectangle};
use crate::proj::center::ProjectionCenter;
use crate::proj::math::{atan2_range, clamp_unit, normalize_lambda, EPSILON};
use crate::proj::{validate_div_n, Projection, DEFAULT_DIV_N};

#[derive(Clone, Debug)]
pub struct Tmerc {
    center: ProjectionCenter,
    table: PeriodicTable,
}

impl Tmerc {
    pub fn new(lam0: f64, phi0: f64) -> Result<Self, ProjError> {
        Self::with_divisions(lam0, phi0, DEFAULT_DIV_N)
    }

    pub fn with_divisions(lam0: f64, phi0: f64, div_n: usize) -> Result<Self, ProjError> {
        Ok(Self {
            center: ProjectionCenter::new(lam0, phi0)?,
            table: PeriodicTable::new(validate_div_n(div_n)?),
        })
    }

    pub fn set_center(&mut self, lam0: f64, phi0: f64) -> Result<(), ProjError> {
        self.center.recenter(lam0, phi0)
    }

    pub fn recentered(&self, lam0: f64, phi0: f64) -> Result<Self, ProjError> {
        let mut p = self.clone();
        p.set_center(lam0, phi0)?;
        Ok(p)
    }

    pub fn div_n(&self) -> usize {
        self.table.div_n()
    }

    /// Whether `base + 2 k pi` falls in `[lo, hi]` for some integer `k`.
    fn has_image(base: f64, lo: f64, hi: f64) -> bool {
        let k = ((lo - base) / TAU).ceil();
        base + k * TAU <= hi
    }
}

impl Projection for Tmerc {
    fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError> {
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lam, cos_lam) = (lambda - self.center.lam0()).sin_cos();

        let b = cos_phi * sin_lam;
        if 1.0 - b.abs() < EPSILON {
            return Err(ProjError::Singular { lambda, phi });
        }
        let x = b.atanh();
        let y = sin_phi.atan2(cos_phi * cos_lam) - self.center.phi0();
        Ok(Point::new(x, normalize_lambda(y)))
    }

    /// Defined for every finite point.
    fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError> {
        let yy = y + self.center.phi0();
        let phi = clamp_unit(yy.sin() / x.cosh()).asin();
        let lambda = x.sinh().atan2(yy.cos()) + self.center.lam0();
        Ok(GeoCoord::new(normalize_lambda(lambda), phi))
    }

    fn range(&self) -> Rectangle {
        Rectangle::new(-PI, -PI, PI, PI)
    }

    fn center(&self) -> GeoCoord {
        self.center.as_geo()
    }

    /// Only `x` is limited; `y` wraps.
    fn check_xy_domain(&self, x: f64, _y: f64, rate: f64) -> bool {
        x.abs() < PI * rate
    }
}

impl BoundedProjection for Tmerc {
    fn bin_unit(&self) -> f64 {
        self.table.unit()
    }

    /// `y` bounds repeat every `2 pi`, i.e. every `2 div_n` bins.
    fn y_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        let period = 2 * self.table.div_n() as i64;
        if hi.saturating_sub(lo) >= period {
            (lo, lo + period - 1)
        } else {
            (lo, hi)
        }
    }

    fn pole_containment(&self, rect: &Rectangle) -> PoleContainment {
        let phi0 = self.center.phi0();
        PoleContainment {
            north: Self::has_image(FRAC_PI_2 - phi0, rect.y1, rect.y2),
            south: Self::has_image(-FRAC_PI_2 - phi0, rect.y1, rect.y2),
        }
    }

    /// With no pole image inside, `cos(y + phi0)` keeps one sign over the
    /// rectangle's `y` range; the cut is where it is negative.
    fn crosses_cut(&self, rect: &Rectangle) -> bool {
        let mid = 0.5 * (rect.y1 + rect.y2);
        (mid + self.center.phi0()).cos() < 0.0
    }

    fn phi_along_x(&self, x_idx: i64, y: f64) -> Range {
        let s = (y + self.center.phi0()).sin();
        self.table
            .sech(x_idx)
            .scale(s)
            .clamp(-1.0, 1.0)
            .map_increasing(f64::asin)
    }

    fn phi_along_y(&self, y_idx: i64, x: f64) -> Range {
        self.table
            .sin_shifted(y_idx, self.center.phi0())
            .scale(1.0 / x.cosh())
            .clamp(-1.0, 1.0)
            .map_increasing(f64::asin)
    }

    fn lambda_along_x(&self, x_idx: i64, y: f64) -> Range {
        let denom = Range::point((y + self.center.phi0()).cos());
        atan2_range(self.table.sinh(x_idx), denom).shift(self.center.lam0())
    }

    fn lambda_along_y(&self, y_idx: i64, x: f64) -> Range {
        let denom = self.table.cos_shifted(y_idx, self.center.phi0());
        atan2_range(Range::point(x.sinh()), denom).shift(self.center.lam0())
    }
}
