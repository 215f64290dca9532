pub mod aeqd;
pub(crate) mod azimuthal;
pub mod center;
pub mod laea;
pub mod math;
pub mod tmerc;

use crate::bounds::{BoundedProjection, PoleContainment};
use crate::error::ProjError;
use crate::geom::{GeoCoord, Point, Range, Rectangle};

pub use aeqd::Aeqd;
pub use center::ProjectionCenter;
pub use laea::Laea;
pub use tmerc::Tmerc;

/// Default number of bins the discretized bound tables split their domain into.
pub const DEFAULT_DIV_N: usize = 180;

/// Trait for spherical map projections supporting forward and inverse transforms.
///
/// Angles are radians on the unit sphere. Domain failures are reported as
/// `Err` and are expected to be skipped by callers, not propagated.
pub trait Projection: Send + Sync {
    /// Forward: (lambda, phi) -> projected point
    fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError>;

    /// Inverse: projected point -> (lambda, phi), lambda in `[-pi, pi)`
    fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError>;

    /// Fixed value-domain rectangle of the projection family.
    fn range(&self) -> Rectangle;

    fn center(&self) -> GeoCoord;

    /// Cheap test whether a projected point lies within `rate` times the
    /// domain limit.
    fn check_xy_domain(&self, x: f64, y: f64, rate: f64) -> bool;

    fn forward_geo(&self, geo: GeoCoord) -> Result<Point, ProjError> {
        self.forward(geo.lambda, geo.phi)
    }

    fn inverse_point(&self, p: Point) -> Result<GeoCoord, ProjError> {
        self.inverse(p.x, p.y)
    }
}

/// Projection families known by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionKind {
    Aeqd,
    Laea,
    Tmerc,
}

impl ProjectionKind {
    /// Parse from a string name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aeqd" | "azimuthal_equidistant" => Some(Self::Aeqd),
            "laea" | "lambert_azimuthal_equal_area" => Some(Self::Laea),
            "tmerc" | "transverse_mercator" => Some(Self::Tmerc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aeqd => "aeqd",
            Self::Laea => "laea",
            Self::Tmerc => "tmerc",
        }
    }
}

/// A projection chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnyProjection {
    Aeqd(Aeqd),
    Laea(Laea),
    Tmerc(Tmerc),
}

impl AnyProjection {
    pub fn new(kind: ProjectionKind, lam0: f64, phi0: f64, div_n: usize) -> Result<Self, ProjError> {
        Ok(match kind {
            ProjectionKind::Aeqd => Self::Aeqd(Aeqd::with_divisions(lam0, phi0, div_n)?),
            ProjectionKind::Laea => Self::Laea(Laea::with_divisions(lam0, phi0, div_n)?),
            ProjectionKind::Tmerc => Self::Tmerc(Tmerc::with_divisions(lam0, phi0, div_n)?),
        })
    }

    pub fn from_name(name: &str, lam0: f64, phi0: f64, div_n: usize) -> Result<Self, ProjError> {
        let kind = ProjectionKind::from_name(name)
            .ok_or_else(|| ProjError::InvalidParameter(format!("Unknown projection: {name}")))?;
        Self::new(kind, lam0, phi0, div_n)
    }

    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::Aeqd(_) => ProjectionKind::Aeqd,
            Self::Laea(_) => ProjectionKind::Laea,
            Self::Tmerc(_) => ProjectionKind::Tmerc,
        }
    }

    pub fn set_center(&mut self, lam0: f64, phi0: f64) -> Result<(), ProjError> {
        match self {
            Self::Aeqd(p) => p.set_center(lam0, phi0),
            Self::Laea(p) => p.set_center(lam0, phi0),
            Self::Tmerc(p) => p.set_center(lam0, phi0),
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $e:expr) => {
        match $self {
            AnyProjection::Aeqd($p) => $e,
            AnyProjection::Laea($p) => $e,
            AnyProjection::Tmerc($p) => $e,
        }
    };
}

impl Projection for AnyProjection {
    fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError> {
        dispatch!(self, p => p.forward(lambda, phi))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError> {
        dispatch!(self, p => p.inverse(x, y))
    }

    fn range(&self) -> Rectangle {
        dispatch!(self, p => p.range())
    }

    fn center(&self) -> GeoCoord {
        dispatch!(self, p => p.center())
    }

    fn check_xy_domain(&self, x: f64, y: f64, rate: f64) -> bool {
        dispatch!(self, p => p.check_xy_domain(x, y, rate))
    }
}

impl BoundedProjection for AnyProjection {
    fn bin_unit(&self) -> f64 {
        dispatch!(self, p => p.bin_unit())
    }

    fn x_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        dispatch!(self, p => p.x_bin_window(lo, hi))
    }

    fn y_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        dispatch!(self, p => p.y_bin_window(lo, hi))
    }

    fn pole_containment(&self, rect: &Rectangle) -> PoleContainment {
        dispatch!(self, p => p.pole_containment(rect))
    }

    fn crosses_cut(&self, rect: &Rectangle) -> bool {
        dispatch!(self, p => p.crosses_cut(rect))
    }

    fn phi_along_x(&self, x_idx: i64, y: f64) -> Range {
        dispatch!(self, p => p.phi_along_x(x_idx, y))
    }

    fn phi_along_y(&self, y_idx: i64, x: f64) -> Range {
        dispatch!(self, p => p.phi_along_y(y_idx, x))
    }

    fn lambda_along_x(&self, x_idx: i64, y: f64) -> Range {
        dispatch!(self, p => p.lambda_along_x(x_idx, y))
    }

    fn lambda_along_y(&self, y_idx: i64, x: f64) -> Range {
        dispatch!(self, p => p.lambda_along_y(y_idx, x))
    }
}

pub(crate) fn validate_div_n(div_n: usize) -> Result<usize, ProjError> {
    if div_n == 0 {
        return Err(ProjError::InvalidParameter(
            "div_n must be positive".into(),
        ));
    }
    Ok(div_n)
}
