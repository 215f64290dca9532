//! Graticule lines for a view window.

use std::f64::consts::{PI, TAU};

use log::debug;
use rayon::prelude::*;

use crate::affine::Affine;
use crate::bounds::{BoundedProjection, BoundsResolver};
use crate::error::GraticuleError;
use crate::geom::{GeoRect, Rectangle};
use crate::graticule::chunk::{chunk_run, Chunk};
use crate::graticule::clip::split_runs;
use crate::graticule::sampler::CurveSampler;
use crate::graticule::{GraticuleConfig, LineKind};
use crate::proj::math::normalize_lambda;

/// The visible part of one graticule line piece.
#[derive(Clone, Debug)]
pub struct GraticulePolyline {
    pub kind: LineKind,
    /// Fixed longitude of a meridian or latitude of a parallel, radians.
    pub value: f64,
    pub chunks: Vec<Chunk>,
}

/// A line piece to sample: `kind` through `value` for `t` in `[t1, t2]`.
#[derive(Clone, Copy, Debug)]
struct LineJob {
    kind: LineKind,
    value: f64,
    t1: f64,
    t2: f64,
}

pub struct GraticuleGenerator<'a, P: BoundedProjection + ?Sized> {
    proj: &'a P,
    config: GraticuleConfig,
    resolver: BoundsResolver,
}

impl<'a, P: BoundedProjection + ?Sized> GraticuleGenerator<'a, P> {
    pub fn new(proj: &'a P, config: GraticuleConfig) -> Result<Self, GraticuleError> {
        config.validate()?;
        Ok(Self {
            proj,
            config,
            resolver: BoundsResolver::default(),
        })
    }

    pub fn with_resolver(mut self, resolver: BoundsResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &GraticuleConfig {
        &self.config
    }

    /// Meridians and parallels at multiples of `span_deg` degrees crossing
    /// `view`, in screen coordinates of `view` mapped onto `[-1, 1]²`.
    pub fn generate(
        &self,
        view: &Rectangle,
        span_deg: f64,
    ) -> Result<Vec<GraticulePolyline>, GraticuleError> {
        if !(span_deg.is_finite() && span_deg > 0.0 && span_deg <= 180.0) {
            return Err(GraticuleError::InvalidConfig(format!(
                "span_deg must be in (0, 180], got {span_deg}"
            )));
        }
        let view = view.normalized();
        let screen = Affine::from_rects(&view, &Rectangle::new(-1.0, -1.0, 1.0, 1.0))?;
        let geo = self.resolver.resolve(self.proj, &view);
        let span = span_deg.to_radians();

        let mut jobs = self.meridian_jobs(&geo, span);
        let n_meridian = jobs.len();
        jobs.extend(self.parallel_jobs(&geo, span));
        debug!(
            "{view:?} -> {geo:?}: {n_meridian} meridian and {} parallel pieces",
            jobs.len() - n_meridian
        );

        let sampler = CurveSampler::new(self.proj, self.config);
        let lines: Vec<GraticulePolyline> = jobs
            .par_iter()
            .filter_map(|job| {
                let samples = sampler.sample(job.kind, job.value, job.t1, job.t2)?;
                let chunks: Vec<Chunk> = split_runs(&samples, &screen, &self.config)
                    .iter()
                    .flat_map(|run| chunk_run(run, self.config.max_vertices))
                    .collect();
                (!chunks.is_empty()).then_some(GraticulePolyline {
                    kind: job.kind,
                    value: job.value,
                    chunks,
                })
            })
            .collect();

        debug!("{} of {} line pieces visible", lines.len(), jobs.len());
        Ok(lines)
    }

    /// Meridians inside the longitude range, each split at the equator and
    /// at the antipode latitude `-phi0`.
    fn meridian_jobs(&self, geo: &GeoRect, span: f64) -> Vec<LineJob> {
        let limit = self.config.latitude_limit();
        let phi1 = geo.phi1.max(-limit);
        let phi2 = geo.phi2.min(limit);
        if phi2 <= phi1 {
            return Vec::new();
        }

        let mut cuts = vec![phi1, phi2];
        let antipode_phi = -self.proj.center().phi;
        for c in [0.0, antipode_phi] {
            if phi1 < c && c < phi2 {
                cuts.push(c);
            }
        }
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();

        let first = (geo.lambda1 / span).ceil() as i64;
        let last = (geo.lambda2 / span).floor() as i64;
        let mut jobs = Vec::new();
        for k in first..=last {
            let lambda = k as f64 * span;
            // a full turn would repeat the first meridian
            if geo.lambda1 + TAU <= lambda + 1e-12 && first < k {
                break;
            }
            for w in cuts.windows(2) {
                jobs.push(LineJob {
                    kind: LineKind::Meridian,
                    value: normalize_lambda(lambda),
                    t1: w[0],
                    t2: w[1],
                });
            }
        }
        jobs
    }

    /// Parallels inside the latitude range, each split at the antipode
    /// meridian `lam0 - pi`.
    fn parallel_jobs(&self, geo: &GeoRect, span: f64) -> Vec<LineJob> {
        let limit = self.config.latitude_limit();
        let phi1 = geo.phi1.max(-limit);
        let phi2 = geo.phi2.min(limit);
        if phi2 < phi1 {
            return Vec::new();
        }

        let (l1, l2) = (geo.lambda1, geo.lambda2);
        let antipode = normalize_lambda(self.proj.center().lambda - PI);
        let lam_ranges = if l1 < antipode && antipode < l2 {
            vec![(l1, antipode), (antipode, l2)]
        } else if l1 < antipode + TAU && antipode + TAU < l2 {
            vec![(l1, antipode + TAU), (antipode + TAU, l2)]
        } else {
            vec![(l1, l2)]
        };

        let first = (phi1 / span).ceil() as i64;
        let last = (phi2 / span).floor() as i64;
        let mut jobs = Vec::new();
        for k in first..=last {
            let phi = k as f64 * span;
            for &(t1, t2) in &lam_ranges {
                jobs.push(LineJob {
                    kind: LineKind::Parallel,
                    value: phi,
                    t1,
                    t2,
                });
            }
        }
        jobs
    }
}
