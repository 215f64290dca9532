//! Spherical Lambert Azimuthal Equal-Area projection.
//!
//! The whole sphere maps onto a disc of radius 2; a point at angular
//! distance `c` from the center lands at radius `2 sin(c / 2)`.

use std::f64::consts::FRAC_PI_2;

use crate::bounds::{BoundedProjection, PoleContainment};
use crate::discrete::EqualArea;
use crate::error::ProjError;
use crate::geom::{GeoCoord, Point, Range, Rectangle};
use crate::proj::azimuthal::{has_north_image, has_south_image, AzimuthalCore};
use crate::proj::center::ProjectionCenter;
use crate::proj::math::{EPSILON, SQRT_2};
use crate::proj::{validate_div_n, Projection, DEFAULT_DIV_N};

#[derive(Clone, Debug)]
pub struct Laea {
    core: AzimuthalCore<EqualArea>,
}

impl Laea {
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
        let c0 = &self.core.center;
        let north = has_north_image(c0.phi0())
            .then(|| SQRT_2 * c0.cos_phi0() / (1.0 + c0.sin_phi0()).sqrt());
        let south = has_south_image(c0.phi0())
            .then(|| -SQRT_2 * c0.cos_phi0() / (1.0 - c0.sin_phi0()).sqrt());
        (north, south)
    }
}

impl Projection for Laea {
    fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError> {
        let c0 = &self.core.center;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_lam, cos_lam) = (lambda - c0.lam0()).sin_cos();

        // 1 + cos(c)
        let q = 1.0 + c0.sin_phi0() * sin_phi + c0.cos_phi0() * cos_phi * cos_lam;
        if q.abs() < EPSILON {
            return Err(ProjError::Antipodal { lambda, phi });
        }

        let k = (2.0 / q).sqrt();
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

impl BoundedProjection for Laea {
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
