//! Endpoint search and adaptive subdivision of one graticule line.

use log::trace;

use crate::geom::Point;
use crate::graticule::{GraticuleConfig, LineKind};
use crate::proj::Projection;

/// One accepted point on a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Projected-plane position.
    pub point: Point,
    /// Curve parameter.
    pub t: f64,
    /// Projected distance from the previous sample; `0` for the first.
    pub step: f64,
}

/// Pending subdivision work, processed depth-first so samples come out in
/// curve order.
enum Work {
    Emit(Sample),
    Split {
        v1: f64,
        p1: Point,
        v2: f64,
        p2: Point,
        depth: usize,
    },
}

/// Samples graticule lines through a projection's forward transform.
pub struct CurveSampler<'a, P: Projection + ?Sized> {
    proj: &'a P,
    config: GraticuleConfig,
    th_sq: f64,
}

impl<'a, P: Projection + ?Sized> CurveSampler<'a, P> {
    pub fn new(proj: &'a P, config: GraticuleConfig) -> Self {
        Self {
            proj,
            config,
            th_sq: config.threshold * config.threshold,
        }
    }

    pub fn config(&self) -> &GraticuleConfig {
        &self.config
    }

    /// Meridian at `lambda` from `phi1` to `phi2`.
    pub fn sample_meridian(&self, lambda: f64, phi1: f64, phi2: f64) -> Option<Vec<Sample>> {
        self.sample(LineKind::Meridian, lambda, phi1, phi2)
    }

    /// Parallel at `phi` from `lam1` to `lam2`.
    pub fn sample_parallel(&self, phi: f64, lam1: f64, lam2: f64) -> Option<Vec<Sample>> {
        self.sample(LineKind::Parallel, phi, lam1, lam2)
    }

    /// Ordered samples of the line through `value` for `t` between `v1` and
    /// `v2`, or `None` when no point of it projects inside the domain.
    pub fn sample(&self, kind: LineKind, value: f64, v1: f64, v2: f64) -> Option<Vec<Sample>> {
        let Some(v_ini) = self.search_end_point(kind, value, v1, v2) else {
            trace!("{} {value}: no valid point from {v1}", kind.name());
            return None;
        };
        let v_fin = self.search_end_point(kind, value, v2, v1)?;

        let n = self.config.init_div_num;
        let mut out = Vec::with_capacity(2 * n + 2);
        let mut prev: Option<(f64, Point)> = None;
        for k in 0..=n {
            let v = self.interpolate(v_ini, v_fin, k);
            let Some(p) = self.project(kind, value, v) else {
                continue;
            };
            match prev {
                Some((v0, p0)) if self.th_sq < p0.distance_sq(&p) => {
                    self.subdivide(kind, value, v0, p0, v, p, &mut out);
                }
                Some((_, p0)) => out.push(Sample {
                    point: p,
                    t: v,
                    step: p0.distance(&p),
                }),
                None => out.push(Sample {
                    point: p,
                    t: v,
                    step: 0.0,
                }),
            }
            prev = Some((v, p));
        }
        Some(out)
    }

    /// Forward projection restricted to the shrunken domain.
    fn project(&self, kind: LineKind, value: f64, t: f64) -> Option<Point> {
        let (lambda, phi) = kind.to_geo(value, t);
        self.proj
            .forward(lambda, phi)
            .ok()
            .filter(|p| self.proj.check_xy_domain(p.x, p.y, self.config.domain_rate))
    }

    fn interpolate(&self, v1: f64, v2: f64, k: usize) -> f64 {
        let n = self.config.init_div_num as f64;
        let k = k as f64;
        (v1 * (n - k) + v2 * k) / n
    }

    /// First valid `t` stepping from `v_start` towards `v_end`. When the
    /// first valid coarse step follows invalid ones, the gap between them is
    /// scanned again at finer resolution to get closer to the domain edge.
    fn search_end_point(&self, kind: LineKind, value: f64, v_start: f64, v_end: f64) -> Option<f64> {
        let mut prev_invalid = None;
        for idx in 0..self.config.init_div_num {
            let v = self.interpolate(v_start, v_end, idx);
            if self.project(kind, value, v).is_none() {
                prev_invalid = Some(v);
                continue;
            }
            let Some(outside) = prev_invalid else {
                return Some(v);
            };
            let refined = (0..self.config.init_div_num)
                .map(|k| self.interpolate(outside, v, k))
                .find(|&v0| self.project(kind, value, v0).is_some());
            return Some(refined.unwrap_or(v));
        }
        None
    }

    /// A valid interior point of `[v1, v2]`: the midpoint, else the 1:2
    /// point, else the 2:1 point.
    fn midpoint(&self, kind: LineKind, value: f64, v1: f64, v2: f64) -> Option<(f64, Point)> {
        [
            0.5 * (v1 + v2),
            (2.0 * v1 + v2) / 3.0,
            (v1 + 2.0 * v2) / 3.0,
        ]
        .into_iter()
        .find_map(|v| self.project(kind, value, v).map(|p| (v, p)))
    }

    /// Refine `(v1, p1) .. (v2, p2)` until every step is within the
    /// threshold, appending samples after `p1` up to and including `p2`.
    #[allow(clippy::too_many_arguments)]
    fn subdivide(
        &self,
        kind: LineKind,
        value: f64,
        v1: f64,
        p1: Point,
        v2: f64,
        p2: Point,
        out: &mut Vec<Sample>,
    ) {
        let mut stack = vec![Work::Split {
            v1,
            p1,
            v2,
            p2,
            depth: 0,
        }];

        while let Some(work) = stack.pop() {
            let (v1, p1, v2, p2, depth) = match work {
                Work::Emit(s) => {
                    out.push(s);
                    continue;
                }
                Work::Split {
                    v1,
                    p1,
                    v2,
                    p2,
                    depth,
                } => (v1, p1, v2, p2, depth),
            };

            let Some((vm, pm)) = self.midpoint(kind, value, v1, v2) else {
                trace!("{} {value}: no valid point in ({v1}, {v2})", kind.name());
                out.push(Sample {
                    point: p2,
                    t: v2,
                    step: p1.distance(&p2),
                });
                continue;
            };

            let d1 = p1.distance_sq(&pm);
            let d2 = pm.distance_sq(&p2);
            let first = Sample {
                point: pm,
                t: vm,
                step: d1.sqrt(),
            };
            let second = Sample {
                point: p2,
                t: v2,
                step: d2.sqrt(),
            };

            if self.config.max_recursion <= depth {
                trace!("{} {value}: recursion limit at t = {vm}", kind.name());
                out.push(first);
                out.push(second);
                continue;
            }

            // right half first so the left half pops first
            stack.push(if d2 <= self.th_sq {
                Work::Emit(second)
            } else {
                Work::Split {
                    v1: vm,
                    p1: pm,
                    v2,
                    p2,
                    depth: depth + 1,
                }
            });
            stack.push(if d1 <= self.th_sq {
                Work::Emit(first)
            } else {
                Work::Split {
                    v1,
                    p1,
                    v2: vm,
                    p2: pm,
                    depth: depth + 1,
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjError;
    use crate::geom::{GeoCoord, Rectangle};
    use crate::proj::{Aeqd, Tmerc};
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_monotone(samples: &[Sample]) {
        let increasing = samples.first().map(|s| s.t) <= samples.last().map(|s| s.t);
        for w in samples.windows(2) {
            if increasing {
                assert!(w[0].t <= w[1].t, "{} then {}", w[0].t, w[1].t);
            } else {
                assert!(w[0].t >= w[1].t, "{} then {}", w[0].t, w[1].t);
            }
        }
    }

    #[test]
    fn test_steps_within_threshold() {
        let proj = Aeqd::new(0.0, 0.3).unwrap();
        let config = GraticuleConfig {
            threshold: 0.05,
            ..Default::default()
        };
        let sampler = CurveSampler::new(&proj, config);
        let samples = sampler.sample_parallel(0.5, -2.0, 2.0).unwrap();
        assert_monotone(&samples);
        assert_relative_eq!(samples[0].t, -2.0);
        assert_relative_eq!(samples.last().unwrap().t, 2.0);
        for w in samples.windows(2) {
            let d = w[0].point.distance(&w[1].point);
            assert!(d <= 0.05 + 1e-12, "step {d}");
            assert_relative_eq!(w[1].step, d, epsilon = 1e-12);
        }
        assert_eq!(samples[0].step, 0.0);
    }

    #[test]
    fn test_samples_lie_on_the_curve() {
        let proj = Aeqd::new(0.4, -0.2).unwrap();
        let sampler = CurveSampler::new(&proj, GraticuleConfig::default());
        for s in sampler.sample_meridian(1.0, -1.2, 1.2).unwrap() {
            let xy = proj.forward(1.0, s.t).unwrap();
            assert_relative_eq!(xy.x, s.point.x, epsilon = 1e-12);
            assert_relative_eq!(xy.y, s.point.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_endpoint_search_trims_to_domain() {
        // the parallel runs through the antipode at lambda = pi
        let proj = Aeqd::new(0.0, 0.0).unwrap();
        let sampler = CurveSampler::new(&proj, GraticuleConfig::default());
        let samples = sampler.sample_parallel(0.0, 2.0, PI).unwrap();
        assert_relative_eq!(samples[0].t, 2.0);
        let last = samples.last().unwrap();
        assert!(last.t < PI);
        assert!(proj.check_xy_domain(last.point.x, last.point.y, 0.9));
        // refined past the first valid coarse step from the far end
        let coarse = PI + (2.0 - PI) * 3.0 / 8.0;
        assert!(last.t > coarse - 1e-12);
    }

    #[test]
    fn test_unprojectable_curve_is_none() {
        // a meridian arc around the antipode of the center
        let proj = Aeqd::new(0.0, 0.0).unwrap();
        let sampler = CurveSampler::new(&proj, GraticuleConfig::default());
        assert!(sampler.sample_meridian(PI, -0.05, 0.05).is_none());
    }

    /// A projection whose forward transform refuses a band of `t`.
    struct Holed {
        inner: Aeqd,
        hole: (f64, f64),
    }

    impl Projection for Holed {
        fn forward(&self, lambda: f64, phi: f64) -> Result<Point, ProjError> {
            if self.hole.0 < lambda && lambda < self.hole.1 {
                return Err(ProjError::Antipodal { lambda, phi });
            }
            self.inner.forward(lambda, phi)
        }
        fn inverse(&self, x: f64, y: f64) -> Result<GeoCoord, ProjError> {
            self.inner.inverse(x, y)
        }
        fn range(&self) -> Rectangle {
            self.inner.range()
        }
        fn center(&self) -> GeoCoord {
            self.inner.center()
        }
        fn check_xy_domain(&self, x: f64, y: f64, rate: f64) -> bool {
            self.inner.check_xy_domain(x, y, rate)
        }
    }

    #[test]
    fn test_gap_becomes_a_straight_chord() {
        let proj = Holed {
            inner: Aeqd::new(0.0, 0.0).unwrap(),
            hole: (-0.6, 0.6),
        };
        let config = GraticuleConfig {
            init_div_num: 2,
            threshold: 0.1,
            ..Default::default()
        };
        let sampler = CurveSampler::new(&proj, config);
        let samples = sampler.sample_parallel(0.0, -1.0, 1.0).unwrap();
        assert_monotone(&samples);
        assert!(samples.iter().all(|s| s.t <= -0.6 || s.t >= 0.6));
        let jump = samples.iter().map(|s| s.step).fold(0.0, f64::max);
        assert!(jump >= 1.2 - 1e-9);
    }

    #[test]
    fn test_recursion_limit_caps_samples() {
        // y wraps on the back side so the step never shrinks below the
        // threshold there
        let proj = Tmerc::new(0.0, 0.0).unwrap();
        let config = GraticuleConfig {
            max_recursion: 3,
            ..Default::default()
        };
        let sampler = CurveSampler::new(&proj, config);
        let samples = sampler.sample_meridian(PI, -FRAC_PI_2 + 0.1, FRAC_PI_2 - 0.1).unwrap();
        assert_monotone(&samples);
        // 8 coarse steps, each split into at most 2^(3 + 1) pieces
        assert!(samples.len() <= 1 + 8 * 16);
        let jump = samples.iter().map(|s| s.step).fold(0.0, f64::max);
        assert!(jump > PI);
    }
}
