//! Inverse and bin-wise bounds shared by the azimuthal projections.
//!
//! With `c = c(rho)` the angular distance from the center:
//!
//! ```text
//! sin(phi)       = cos(c) sin(phi0) + y (sin(c) / rho) cos(phi0)
//! lambda - lam0  = atan2(x, rho cot(c) cos(phi0) - y sin(phi0))
//! ```
//!
//! For a polar center the longitude reduces to `atan2(x, -y)` (north) or
//! `atan2(x, y)` (south).

use std::f64::consts::FRAC_PI_2;

use crate::bounds::PoleContainment;
use crate::discrete::{RadialProfile, RadialTable};
use crate::error::ProjError;
use crate::geom::{GeoCoord, Range, Rectangle};
use crate::proj::center::ProjectionCenter;
use crate::proj::math::{atan2_range, clamp_unit, is_polar, normalize_lambda, EPSILON};

#[derive(Clone, Copy, Debug)]
pub(crate) struct AzimuthalCore<P: RadialProfile> {
    pub center: ProjectionCenter,
    pub table: RadialTable<P>,
}

impl<P: RadialProfile> AzimuthalCore<P> {
    pub fn new(center: ProjectionCenter, div_n: usize) -> Self {
        Self {
            center,
            table: RadialTable::new(div_n),
        }
    }

    pub fn range(&self) -> Rectangle {
        Rectangle::new(-P::DOMAIN, -P::DOMAIN, P::DOMAIN, P::DOMAIN)
    }

    pub fn check_xy_domain(&self, x: f64, y: f64, rate: f64) -> bool {
        let lim = P::DOMAIN * rate;
        x * x + y * y < lim * lim
    }

    /// `-1` for a north polar center, `+1` for a south polar one.
    fn polar_sign(&self) -> f64 {
        if self.center.phi0() > 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError> {
        let rh2 = x * x + y * y;
        if P::DOMAIN * P::DOMAIN < rh2 {
            return Err(ProjError::OutOfDomain { x, y });
        }
        let rho = rh2.sqrt();
        if rho < EPSILON {
            return Ok(self.center.as_geo());
        }

        let c = P::angle(rho);
        let (sin_c, cos_c) = c.sin_cos();
        let (sin_phi0, cos_phi0) = (self.center.sin_phi0(), self.center.cos_phi0());

        let phi = clamp_unit(cos_c * sin_phi0 + y * sin_c * cos_phi0 / rho).asin();
        let lambda = if is_polar(self.center.phi0()) {
            x.atan2(self.polar_sign() * y)
        } else {
            (x * sin_c).atan2(rho * cos_c * cos_phi0 - y * sin_phi0 * sin_c)
        };

        Ok(GeoCoord::new(normalize_lambda(lambda + self.center.lam0()), phi))
    }

    /// Bins past the disc saturate and are not invertible, so a walk only
    /// needs the bins of `[-DOMAIN, DOMAIN]` plus one saturated bin on each
    /// side.
    pub fn bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        let min = self.table.to_discrete(-P::DOMAIN) - 1;
        let max = self.table.to_discrete(P::DOMAIN) + 1;
        (lo.clamp(min, max), hi.clamp(min, max))
    }

    /// Pole images at `x = 0` given their `y` positions; `None` when the
    /// pole coincides with the antipode of the center and has no image.
    pub fn pole_containment(
        &self,
        rect: &Rectangle,
        north: Option<f64>,
        south: Option<f64>,
    ) -> PoleContainment {
        let inside = |y: Option<f64>| y.is_some_and(|y| rect.y1 <= y && y <= rect.y2);
        PoleContainment {
            north: inside(north),
            south: inside(south),
        }
    }

    /// The cut runs up from the north pole image and down from the south
    /// pole image.
    pub fn crosses_cut(&self, rect: &Rectangle, north: Option<f64>, south: Option<f64>) -> bool {
        south.is_some_and(|ys| rect.y2 < ys) || north.is_some_and(|yn| yn < rect.y1)
    }

    pub fn phi_along_x(&self, x_idx: i64, y: f64) -> Range {
        let t1 = self.table.cos_r(x_idx, y).scale(self.center.sin_phi0());
        let t2 = self
            .table
            .sin_r_div_r(x_idx, y)
            .scale(y * self.center.cos_phi0());
        t1.add(&t2).clamp(-1.0, 1.0).map_increasing(f64::asin)
    }

    pub fn phi_along_y(&self, y_idx: i64, x: f64) -> Range {
        let t1 = self.table.cos_r(y_idx, x).scale(self.center.sin_phi0());
        let t2 = self
            .table
            .bin(y_idx)
            .mul(&self.table.sin_r_div_r(y_idx, x))
            .scale(self.center.cos_phi0());
        t1.add(&t2).clamp(-1.0, 1.0).map_increasing(f64::asin)
    }

    pub fn lambda_along_x(&self, x_idx: i64, y: f64) -> Range {
        let xs = self.table.bin(x_idx);
        let denom = if is_polar(self.center.phi0()) {
            Range::point(self.polar_sign() * y)
        } else {
            self.table
                .r_cot_r(x_idx, y)
                .scale(self.center.cos_phi0())
                .shift(-self.center.sin_phi0() * y)
        };
        atan2_range(xs, denom).shift(self.center.lam0())
    }

    pub fn lambda_along_y(&self, y_idx: i64, x: f64) -> Range {
        let ys = self.table.bin(y_idx);
        let denom = if is_polar(self.center.phi0()) {
            ys.scale(self.polar_sign())
        } else {
            self.table
                .r_cot_r(y_idx, x)
                .scale(self.center.cos_phi0())
                .add(&ys.scale(-self.center.sin_phi0()))
        };
        atan2_range(Range::point(x), denom).shift(self.center.lam0())
    }
}

/// Whether the north pole has an image distinct from the antipode.
pub(crate) fn has_north_image(phi0: f64) -> bool {
    -(FRAC_PI_2 - EPSILON) < phi0
}

pub(crate) fn has_south_image(phi0: f64) -> bool {
    phi0 < FRAC_PI_2 - EPSILON
}
