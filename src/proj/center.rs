use crate::error::ProjError;
use crate::geom::GeoCoord;

/// Projection center with its latitude trig cached.
///
/// The cache is only reachable through [`ProjectionCenter::new`] and
/// [`ProjectionCenter::recenter`], so it never goes stale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionCenter {
    lam0: f64,
    phi0: f64,
    sin_phi0: f64,
    cos_phi0: f64,
}

impl ProjectionCenter {
    pub fn new(lam0: f64, phi0: f64) -> Result<Self, ProjError> {
        if !lam0.is_finite() || !phi0.is_finite() {
            return Err(ProjError::InvalidParameter(format!(
                "projection center must be finite, got ({lam0}, {phi0})"
            )));
        }
        if phi0.abs() > std::f64::consts::FRAC_PI_2 {
            return Err(ProjError::InvalidParameter(format!(
                "center latitude {phi0} outside [-pi/2, pi/2]"
            )));
        }
        Ok(Self {
            lam0,
            phi0,
            sin_phi0: phi0.sin(),
            cos_phi0: phi0.cos(),
        })
    }

    pub fn recenter(&mut self, lam0: f64, phi0: f64) -> Result<(), ProjError> {
        *self = Self::new(lam0, phi0)?;
        Ok(())
    }

    #[inline]
    pub fn lam0(&self) -> f64 {
        self.lam0
    }

    #[inline]
    pub fn phi0(&self) -> f64 {
        self.phi0
    }

    #[inline]
    pub fn sin_phi0(&self) -> f64 {
        self.sin_phi0
    }

    #[inline]
    pub fn cos_phi0(&self) -> f64 {
        self.cos_phi0
    }

    pub fn as_geo(&self) -> GeoCoord {
        GeoCoord::new(self.lam0, self.phi0)
    }
}

impl Default for ProjectionCenter {
    fn default() -> Self {
        Self {
            lam0: 0.0,
            phi0: 0.0,
            sin_phi0: 0.0,
            cos_phi0: 1.0,
        }
    }
}
