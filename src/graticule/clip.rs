//! Screen clipping and run segmentation.
//!
//! Samples are mapped onto the unit screen square `[-1, 1]²`. A run ends
//! where the line leaves the screen, where consecutive samples are far
//! apart on screen, or where the sampler left a gap larger than the
//! separation threshold. Lines never re-enter the screen within one run.

use crate::affine::Affine;
use crate::geom::Point;
use crate::graticule::sampler::Sample;
use crate::graticule::GraticuleConfig;

/// Screen-space vertex with the curve parameter it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl Vertex {
    fn lerp(a: &Vertex, b: &Vertex, k: f64) -> Vertex {
        Vertex {
            x: a.x + (b.x - a.x) * k,
            y: a.y + (b.y - a.y) * k,
            t: a.t + (b.t - a.t) * k,
        }
    }

    fn on_screen(&self) -> bool {
        (-1.0..=1.0).contains(&self.x) && (-1.0..=1.0).contains(&self.y)
    }
}

/// Parameters `(k0, k1)` of the part of segment `a -> b` inside the unit
/// square (Liang–Barsky), or `None` when it misses the square.
fn clip_segment(a: &Vertex, b: &Vertex) -> Option<(f64, f64)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut k0 = 0.0_f64;
    let mut k1 = 1.0_f64;
    for (p, q) in [
        (-dx, a.x + 1.0),
        (dx, 1.0 - a.x),
        (-dy, a.y + 1.0),
        (dy, 1.0 - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            k0 = k0.max(r);
        } else {
            k1 = k1.min(r);
        }
        if k1 < k0 {
            return None;
        }
    }
    Some((k0, k1))
}

/// Collects runs; a run shorter than two vertices is dropped on close.
#[derive(Default)]
struct RunBuilder {
    runs: Vec<Vec<Vertex>>,
    current: Vec<Vertex>,
}

impl RunBuilder {
    fn push(&mut self, v: Vertex) {
        self.current.push(v);
    }

    fn close(&mut self) {
        let run = std::mem::take(&mut self.current);
        if run.len() >= 2 {
            self.runs.push(run);
        }
    }

    fn finish(mut self) -> Vec<Vec<Vertex>> {
        self.close();
        self.runs
    }
}

/// Split ordered samples into on-screen runs.
///
/// `screen` maps the projected plane onto `[-1, 1]²`. Segments between
/// near samples are clipped exactly against the screen edge, so a run
/// that enters or leaves the screen starts or ends on the boundary.
pub fn split_runs(samples: &[Sample], screen: &Affine, config: &GraticuleConfig) -> Vec<Vec<Vertex>> {
    let far_limit = config.far_away_factor * screen.scale_y().abs();
    let mut builder = RunBuilder::default();
    let mut prev: Option<Vertex> = None;

    for (i, s) in samples.iter().enumerate() {
        let p: Point = screen.forward_point(s.point);
        let cur = Vertex {
            x: p.x,
            y: p.y,
            t: s.t,
        };

        let gap = i > 0 && config.separate_threshold < s.step;
        let far = prev.is_some_and(|a| far_limit < (a.x - cur.x).abs() + (a.y - cur.y).abs());
        let Some(a) = prev.filter(|_| !gap && !far) else {
            builder.close();
            if cur.on_screen() {
                builder.push(cur);
            }
            prev = Some(cur);
            continue;
        };

        match (a.on_screen(), cur.on_screen()) {
            (true, true) => builder.push(cur),
            (true, false) => {
                if let Some((_, k1)) = clip_segment(&a, &cur) {
                    builder.push(Vertex::lerp(&a, &cur, k1));
                }
                builder.close();
            }
            (false, true) => {
                builder.close();
                if let Some((k0, _)) = clip_segment(&a, &cur) {
                    builder.push(Vertex::lerp(&a, &cur, k0));
                }
                builder.push(cur);
            }
            (false, false) => {
                if let Some((k0, k1)) = clip_segment(&a, &cur) {
                    builder.close();
                    builder.push(Vertex::lerp(&a, &cur, k0));
                    builder.push(Vertex::lerp(&a, &cur, k1));
                    builder.close();
                }
            }
        }
        prev = Some(cur);
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rectangle;
    use approx::assert_relative_eq;

    fn unit() -> Affine {
        Affine::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
        let mut out: Vec<Sample> = Vec::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            let point = Point::new(x, y);
            let step = out.last().map_or(0.0, |s| s.point.distance(&point));
            out.push(Sample {
                point,
                t: i as f64,
                step,
            });
        }
        out
    }

    fn loose() -> GraticuleConfig {
        GraticuleConfig {
            far_away_factor: 10.0,
            separate_threshold: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_inside_line_is_one_run() {
        let s = samples(&[(-0.5, 0.0), (0.0, 0.1), (0.5, 0.2)]);
        let runs = split_runs(&s, &unit(), &loose());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[0][1].t, 1.0);
    }

    #[test]
    fn test_exit_and_reentry_split_runs() {
        let s = samples(&[(0.0, 0.0), (0.5, 0.0), (1.5, 0.0), (1.5, 0.5), (0.5, 0.5), (0.0, 0.5)]);
        let runs = split_runs(&s, &unit(), &loose());
        assert_eq!(runs.len(), 2);

        let exit = runs[0].last().unwrap();
        assert_relative_eq!(exit.x, 1.0);
        assert_relative_eq!(exit.t, 1.5);

        let entry = runs[1][0];
        assert_relative_eq!(entry.x, 1.0);
        assert_relative_eq!(entry.y, 0.5);
        assert_relative_eq!(entry.t, 3.5);
        assert_eq!(runs[1].len(), 3);
    }

    #[test]
    fn test_segment_crossing_screen_from_outside() {
        let s = samples(&[(-2.0, 0.0), (2.0, 0.0)]);
        let runs = split_runs(&s, &unit(), &loose());
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0][0].x, -1.0);
        assert_relative_eq!(runs[0][1].x, 1.0);
        assert_relative_eq!(runs[0][0].t, 0.25);
        assert_relative_eq!(runs[0][1].t, 0.75);
    }

    #[test]
    fn test_far_jump_breaks_without_connecting() {
        let config = GraticuleConfig {
            far_away_factor: 0.5,
            separate_threshold: 10.0,
            ..Default::default()
        };
        let s = samples(&[(-0.9, 0.0), (-0.8, 0.0), (0.8, 0.0), (0.9, 0.0)]);
        let runs = split_runs(&s, &unit(), &config);
        assert_eq!(runs.len(), 2);
        assert_relative_eq!(runs[0].last().unwrap().x, -0.8);
        assert_relative_eq!(runs[1][0].x, 0.8);
    }

    #[test]
    fn test_sampler_gap_breaks_run() {
        let config = GraticuleConfig {
            far_away_factor: 10.0,
            separate_threshold: 0.3,
            ..Default::default()
        };
        let s = samples(&[(-0.6, 0.0), (-0.5, 0.0), (-0.1, 0.0), (0.0, 0.0)]);
        let runs = split_runs(&s, &unit(), &config);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 2);
    }

    #[test]
    fn test_single_vertex_runs_are_dropped() {
        // touches the screen at one sample only
        let s = samples(&[(-3.0, 3.0), (0.0, 0.0), (3.0, 3.0)]);
        let config = GraticuleConfig {
            far_away_factor: 1.0,
            separate_threshold: 10.0,
            ..Default::default()
        };
        assert!(split_runs(&s, &unit(), &config).is_empty());
    }

    #[test]
    fn test_uses_view_transform() {
        let view = Rectangle::new(10.0, 10.0, 12.0, 12.0);
        let screen = Affine::from_rects(&view, &Rectangle::new(-1.0, -1.0, 1.0, 1.0)).unwrap();
        let s = samples(&[(10.5, 11.0), (11.0, 11.0), (11.5, 11.0)]);
        let runs = split_runs(&s, &screen, &loose());
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0][0].x, -0.5);
        assert_relative_eq!(runs[0][2].x, 0.5);
        assert_relative_eq!(runs[0][1].y, 0.0);
    }

    #[test]
    fn test_clip_segment_misses() {
        let a = Vertex { x: -2.0, y: 2.0, t: 0.0 };
        let b = Vertex { x: 2.0, y: 2.0, t: 1.0 };
        assert!(clip_segment(&a, &b).is_none());
        let c = Vertex { x: 2.0, y: 0.0, t: 0.0 };
        assert!(clip_segment(&c, &c).is_none());
    }
}
