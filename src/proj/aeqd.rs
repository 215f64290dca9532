//! Spherical Azimuthal Equidistant projection.
//!
//! Distances from the center are preserved: a point at angular distance `c`
//! lands at radius `c`, so the projected disc has radius `pi`.

use std::f64::consts::FRAC_PI_2;

use crate::bounds::{BoundedProjection, PoleContainment};
use crate::discrete::Equidistant;
use crate::error::ProjError;
use crate::geom::{GeoCoord, Point, Range, Rectangle};
use crate::proj::azimuthal::{has_north_image, has_south_image, AzimuthalCore};
use crate::proj::center::ProjectionCenter;
use crate::proj::math::{clamp_unit, EPSILON};
use crate::proj::{validate_div_n, Projection, DEFAULT_DIV_N};

#[derive(Clone, Debug)]
pub struct Aeqd {
    core: AzimuthalCore<Equidistant>,
}

impl Aeqd {
    pub fn new(lam0: f64, phi0: f64) -> Result<Self, ProjError> {
        Self::with_divisions(lam0, phi0, DEFAULT_DIV_N)
    }

    pub fn with_divisions(lam0: f64, phi0: f64, div_n: usize) -> Result<Self, ProjError> {
        let center = ProjectionCenter::new(lam0, phi0)?;
        Ok(Self {
            core: AzimuthalCore::new(center, validate_div_n(div_n)?),
        })
    }

    pub fn set_center(&mut self, lam0: f64, phi0: f64) -> Result<(), ProjError> {
        self.core.center.recenter(lam0, phi0)
    }

    pub fn recentered(&self, lam0: f64, phi0: f64) -> Result<Self, ProjError> {
        let mut p = self.clone();
        p.set_center(lam0, phi0)?;
        Ok(p)
    }

    pub fn div_n(&self) -> usize {
        self.core.table.div_n()
    }

    fn pole_ys(&self) -> (Option<f64>, Option<f64>) {
        let phi0 = self.core.center.phi0();
        let north = has_north_image(phi0).then(|| FRAC_PI_2 - phi0);
        let south = has_south_image(phi0).then(|| -FRAC_PI_2 - phi0);
        (north, south)
    }
}

impl Projection for Aeqd {
    fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError> {
        let c0 = &self.core.center;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lam, cos_lam) = (lambda - c0.lam0()).sin_cos();

        let c = clamp_unit(c0.sin_phi0() * sin_phi + c0.cos_phi0() * cos_phi * cos_lam).acos();
        if c.abs() < EPSILON {
            return Ok(Point::new(0.0, 0.0));
        }
        let sin_c = c.sin();
        if sin_c.abs() < EPSILON {
            return Err(ProjError::Antipodal { lambda, phi });
        }

        let k = c / sin_c;
        Ok(Point::new(
            k * cos_phi * sin_lam,
            k * (c0.cos_phi0() * sin_phi - c0.sin_phi0() * cos_phi * cos_lam),
        ))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError> {
        self.core.inverse(x, y)
    }

    fn range(&self) -> Rectangle {
        self.core.range()
    }

    fn center(&self) -> GeoCoord {
        self.core.center.as_geo()
    }

    fn check_xy_domain(&self, x: f64, y: f64, rate: f64) -> bool {
        self.core.check_xy_domain(x, y, rate)
    }
}

impl BoundedProjection for Aeqd {
    fn bin_unit(&self) -> f64 {
        self.core.table.unit()
    }

    fn x_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        self.core.bin_window(lo, hi)
    }

    fn y_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        self.core.bin_window(lo, hi)
    }

    fn pole_containment(&self, rect: &Rectangle) -> PoleContainment {
        let (north, south) = self.pole_ys();
        self.core.pole_containment(rect, north, south)
    }

    fn crosses_cut(&self, rect: &Rectangle) -> bool {
        let (north, south) = self.pole_ys();
        self.core.crosses_cut(rect, north, south)
    }

    fn phi_along_x(&self, x_idx: i64, y: f64) -> Range {
        self.core.phi_along_x(x_idx, y)
    }

    fn phi_along_y(&self, y_idx: i64, x: f64) -> Range {
        self.core.phi_along_y(y_idx, x)
    }

    fn lambda_along_x(&self, x_idx: i64, y: f64) -> Range {
        self.core.lambda_along_x(x_idx, y)
    }

    fn lambda_along_y(&self, y_idx: i64, x: f64) -> Range {
        self.core.lambda_along_y(y_idx, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_center_maps_to_origin() {
        let p = Aeqd::new(0.4, 0.7).unwrap();
        let xy = p.forward(0.4, 0.7).unwrap();
        assert_relative_eq!(xy.x, 0.0);
        assert_relative_eq!(xy.y, 0.0);
        let geo = p.inverse(0.0, 0.0).unwrap();
        assert_relative_eq!(geo.lambda, 0.4);
        assert_relative_eq!(geo.phi, 0.7);
    }

    #[test]
    fn test_distance_is_preserved() {
        let p = Aeqd::new(0.0, 0.0).unwrap();
        let xy = p.forward(0.0, 1.0).unwrap();
        assert_relative_eq!(xy.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(xy.y, 1.0, epsilon = 1e-12);
        let xy = p.forward(1.2, 0.0).unwrap();
        assert_relative_eq!(xy.x, 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_antipode_is_a_domain_failure() {
        let p = Aeqd::new(0.3, 0.2).unwrap();
        let err = p.forward(0.3 - PI, -0.2).unwrap_err();
        assert!(err.is_domain_failure());
        assert!(matches!(err, ProjError::Antipodal { .. }));
    }

    #[test]
    fn test_outside_disc_is_a_domain_failure() {
        let p = Aeqd::new(0.0, 0.0).unwrap();
        assert!(matches!(
            p.inverse(3.0, 1.0),
            Err(ProjError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_roundtrip() {
        for (lam0, phi0) in [(0.0, 0.0), (1.0, 0.5), (-2.5, -1.2), (0.2, FRAC_PI_2)] {
            let p = Aeqd::new(lam0, phi0).unwrap();
            for i in -6..=6 {
                for j in -6..=6 {
                    let (x, y) = (i as f64 * 0.4, j as f64 * 0.4);
                    if x.hypot(y) > 0.95 * PI {
                        continue;
                    }
                    let geo = p.inverse(x, y).unwrap();
                    let xy = p.forward(geo.lambda, geo.phi).unwrap();
                    assert_relative_eq!(xy.x, x, epsilon = 1e-7);
                    assert_relative_eq!(xy.y, y, epsilon = 1e-7);
                }
            }
        }
    }

    #[test]
    fn test_geo_roundtrip() {
        let p = Aeqd::new(0.5, 0.3).unwrap();
        for (lam, phi) in [(0.0, 0.0), (1.5, -0.8), (-1.0, 1.2), (2.5, 0.4)] {
            let xy = p.forward(lam, phi).unwrap();
            let geo = p.inverse(xy.x, xy.y).unwrap();
            assert_relative_eq!(geo.lambda, lam, epsilon = 1e-7);
            assert_relative_eq!(geo.phi, phi, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_recentered_is_independent() {
        let p = Aeqd::new(0.0, 0.0).unwrap();
        let q = p.recentered(1.0, 0.5).unwrap();
        assert_relative_eq!(p.center().lambda, 0.0);
        assert_relative_eq!(q.center().lambda, 1.0);
        assert_relative_eq!(q.center().phi, 0.5);
        let xy = q.forward(1.0, 0.5).unwrap();
        assert_relative_eq!(xy.x, 0.0);
    }

    #[test]
    fn test_check_xy_domain() {
        let p = Aeqd::new(0.0, 0.0).unwrap();
        assert!(p.check_xy_domain(2.0, 0.0, 0.9));
        assert!(!p.check_xy_domain(3.0, 0.0, 0.9));
        assert_eq!(p.range(), Rectangle::new(-PI, -PI, PI, PI));
    }

    #[test]
    fn test_rejects_zero_divisions() {
        assert!(Aeqd::with_divisions(0.0, 0.0, 0).is_err());
        assert_eq!(Aeqd::with_divisions(0.0, 0.0, 36).unwrap().div_n(), 36);
    }
}
