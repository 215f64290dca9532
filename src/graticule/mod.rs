//! Adaptive graticule sampling.
//!
//! A graticule line is a meridian (fixed longitude) or a parallel (fixed
//! latitude) parameterised by the free coordinate `t`. The pipeline for one
//! line is: [`sampler`] finds valid endpoints and refines the curve until
//! consecutive projected samples are close, [`clip`] maps the samples to the
//! unit screen square and splits them into runs, and [`chunk`] cuts each run
//! into renderer-sized buffers. [`generator`] drives this for every line
//! crossing a view window.

pub mod chunk;
pub mod clip;
pub mod generator;
pub mod sampler;

pub use chunk::{chunk_run, Chunk};
pub use clip::{split_runs, Vertex};
pub use generator::{GraticuleGenerator, GraticulePolyline};
pub use sampler::{CurveSampler, Sample};

use std::f64::consts::PI;

use crate::error::GraticuleError;

/// Which coordinate a graticule line holds fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Constant longitude; `t` is latitude.
    Meridian,
    /// Constant latitude; `t` is longitude.
    Parallel,
}

impl LineKind {
    /// Geographic `(lambda, phi)` of the point at `t` on the line through
    /// `value`.
    #[inline]
    pub fn to_geo(self, value: f64, t: f64) -> (f64, f64) {
        match self {
            Self::Meridian => (value, t),
            Self::Parallel => (t, value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Meridian => "meridian",
            Self::Parallel => "parallel",
        }
    }
}

/// Sampling, clipping and chunking parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraticuleConfig {
    /// Coarse samples per line, also the number of endpoint search steps.
    pub init_div_num: usize,
    /// Largest projected-plane distance between consecutive samples.
    pub threshold: f64,
    pub max_recursion: usize,
    /// Fraction of the domain radius a sample must fall inside.
    pub domain_rate: f64,
    /// L1 jump between consecutive screen vertices, in projected-plane
    /// units, that breaks a run without a connecting vertex. Keep it above
    /// `threshold * sqrt(2)` so refined steps never trip it.
    pub far_away_factor: f64,
    /// Projected-plane step between samples that breaks a run.
    pub separate_threshold: f64,
    /// Vertex limit per output chunk.
    pub max_vertices: usize,
    /// Lines are kept within this many degrees of the equator.
    pub latitude_limit_deg: f64,
}

impl Default for GraticuleConfig {
    fn default() -> Self {
        Self {
            init_div_num: 8,
            threshold: PI / 8.0,
            max_recursion: 8,
            domain_rate: 0.9,
            far_away_factor: PI / 4.0,
            separate_threshold: PI / 8.0,
            max_vertices: 64,
            latitude_limit_deg: 80.0,
        }
    }
}

impl GraticuleConfig {
    pub fn validate(&self) -> Result<(), GraticuleError> {
        if self.init_div_num == 0 {
            return Err(GraticuleError::InvalidConfig(
                "init_div_num must be positive".into(),
            ));
        }
        for (name, v) in [
            ("threshold", self.threshold),
            ("far_away_factor", self.far_away_factor),
            ("separate_threshold", self.separate_threshold),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GraticuleError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        if !(self.domain_rate > 0.0 && self.domain_rate <= 1.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "domain_rate must be in (0, 1], got {}",
                self.domain_rate
            )));
        }
        if self.max_vertices < 2 {
            return Err(GraticuleError::InvalidConfig(format!(
                "max_vertices must be at least 2, got {}",
                self.max_vertices
            )));
        }
        if !(self.latitude_limit_deg > 0.0 && self.latitude_limit_deg <= 90.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "latitude_limit_deg must be in (0, 90], got {}",
                self.latitude_limit_deg
            )));
        }
        Ok(())
    }

    pub(crate) fn latitude_limit(&self) -> f64 {
        self.latitude_limit_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GraticuleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let base = GraticuleConfig::default();
        let bad = [
            GraticuleConfig { init_div_num: 0, ..base },
            GraticuleConfig { threshold: 0.0, ..base },
            GraticuleConfig { separate_threshold: f64::INFINITY, ..base },
            GraticuleConfig { domain_rate: 1.5, ..base },
            GraticuleConfig { max_vertices: 1, ..base },
            GraticuleConfig { latitude_limit_deg: 95.0, ..base },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(GraticuleError::InvalidConfig(_))),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn test_line_kind_to_geo() {
        assert_eq!(LineKind::Meridian.to_geo(0.5, -0.2), (0.5, -0.2));
        assert_eq!(LineKind::Parallel.to_geo(0.5, -0.2), (-0.2, 0.5));
    }
}
