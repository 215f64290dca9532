//! Inverse bounding boxes.
//!
//! [`BoundedProjection`] is the capability a projection family provides to
//! the generic [`BoundsResolver`]: where its poles land, where its longitude
//! cut runs, and per-bin bounds of `phi` and `lambda` along horizontal and
//! vertical rectangle edges.

pub mod resolver;

pub use resolver::{BoundsResolver, ResolverOptions};

use crate::geom::{GeoRect, Range, Rectangle};
use crate::proj::Projection;

/// Which pole images fall inside a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoleContainment {
    pub north: bool,
    pub south: bool,
}

impl PoleContainment {
    pub fn any(&self) -> bool {
        self.north || self.south
    }

    pub fn both(&self) -> bool {
        self.north && self.south
    }
}

pub trait BoundedProjection: Projection {
    /// Width of one discretization bin.
    fn bin_unit(&self) -> f64;

    fn to_discrete(&self, t: f64) -> i64 {
        (t / self.bin_unit()).floor() as i64
    }

    /// Bins of `x` to walk for an edge covering bins `lo..=hi`. Bins whose
    /// bounds repeat ones already inside the returned window may be left
    /// out.
    fn x_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        (lo, hi)
    }

    /// Same as [`x_bin_window`](Self::x_bin_window) for `y`.
    fn y_bin_window(&self, lo: i64, hi: i64) -> (i64, i64) {
        (lo, hi)
    }

    /// Pole images inside `rect`. Only consulted when `rect` straddles
    /// `x = 0`; `rect` is normalized.
    fn pole_containment(&self, rect: &Rectangle) -> PoleContainment;

    /// Whether `rect` crosses the segment of `x = 0` along which the inverse
    /// longitude jumps by `2 pi`. Only consulted when `rect` straddles
    /// `x = 0` and contains no pole.
    fn crosses_cut(&self, rect: &Rectangle) -> bool;

    /// Bounds of `phi` for `x` in bin `x_idx` at fixed `y`.
    fn phi_along_x(&self, x_idx: i64, y: f64) -> Range;

    /// Bounds of `phi` for `y` in bin `y_idx` at fixed `x`.
    fn phi_along_y(&self, y_idx: i64, x: f64) -> Range;

    /// Bounds of `lambda` for `x` in bin `x_idx` at fixed `y`. Not wrapped
    /// into `[-pi, pi)`.
    fn lambda_along_x(&self, x_idx: i64, y: f64) -> Range;

    /// Bounds of `lambda` for `y` in bin `y_idx` at fixed `x`.
    fn lambda_along_y(&self, y_idx: i64, x: f64) -> Range;

    /// Geographic rectangle covering every invertible point of `rect`,
    /// using default resolver options.
    fn inverse_bounding_box(&self, rect: &Rectangle) -> GeoRect
    where
        Self: Sized,
    {
        BoundsResolver::default().resolve(self, rect)
    }
}
