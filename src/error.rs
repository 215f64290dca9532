use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    /// Forward projection is undefined at (or numerically next to) the
    /// antipode of the projection center.
    #[error("Point ({lambda}, {phi}) is antipodal to the projection center")]
    Antipodal { lambda: f64, phi: f64 },

    /// Forward projection is undefined at a singular point of the
    /// projection other than the antipode of the center.
    #[error("Point ({lambda}, {phi}) is a singular point of the projection")]
    Singular { lambda: f64, phi: f64 },

    /// Inverse projection of a point outside the value domain.
    #[error("Point ({x}, {y}) lies outside the projection domain")]
    OutOfDomain { x: f64, y: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ProjError {
    /// True for the per-point domain failures that callers are expected to
    /// skip rather than report.
    pub fn is_domain_failure(&self) -> bool {
        matches!(
            self,
            Self::Antipodal { .. } | Self::Singular { .. } | Self::OutOfDomain { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraticuleError {
    #[error("Invalid graticule configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid affine transform: {0}")]
    Affine(String),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),
}
