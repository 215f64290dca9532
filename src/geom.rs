//! Plain coordinate and interval types shared by every module.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::proj::math::normalize_lambda;

/// Geographic coordinate in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoCoord {
    pub lambda: f64,
    pub phi: f64,
}

impl GeoCoord {
    pub fn new(lambda: f64, phi: f64) -> Self {
        Self { lambda, phi }
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self::new(lon.to_radians(), lat.to_radians())
    }
}

/// Point on the projected plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

/// Closed scalar interval with `min <= max`.
///
/// The arithmetic here is plain interval arithmetic: every operation returns
/// an interval containing all results of applying the operation to members of
/// the operands, so chains of operations stay sound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Interval spanning both values, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn point(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Smallest interval containing both operands.
    pub fn union(&self, other: &Range) -> Range {
        Range {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Union where either side may be absent.
    pub fn merge(acc: Option<Range>, other: Option<Range>) -> Option<Range> {
        match (acc, other) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, None) => a,
            (None, b) => b,
        }
    }

    pub fn add(&self, other: &Range) -> Range {
        Range {
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }

    pub fn shift(&self, d: f64) -> Range {
        Range {
            min: self.min + d,
            max: self.max + d,
        }
    }

    /// Multiply by a scalar. Scaling by zero yields exactly zero even for
    /// unbounded intervals.
    pub fn scale(&self, k: f64) -> Range {
        if k == 0.0 {
            return Range::point(0.0);
        }
        Range::new(self.min * k, self.max * k)
    }

    /// Interval product.
    pub fn mul(&self, other: &Range) -> Range {
        let products = [
            self.min * other.min,
            self.min * other.max,
            self.max * other.min,
            self.max * other.max,
        ];
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in products {
            // 0 * inf only arises when one factor is exactly zero
            let p = if p.is_nan() { 0.0 } else { p };
            min = min.min(p);
            max = max.max(p);
        }
        Range { min, max }
    }

    pub fn clamp(&self, lo: f64, hi: f64) -> Range {
        Range {
            min: self.min.clamp(lo, hi),
            max: self.max.clamp(lo, hi),
        }
    }

    /// Apply a monotonically increasing function to both ends.
    pub fn map_increasing(&self, f: impl Fn(f64) -> f64) -> Range {
        Range::new(f(self.min), f(self.max))
    }
}

/// Geographic bounding rectangle.
///
/// `lambda1` is kept in `[-pi, pi)` and `lambda2 - lambda1 <= 2 pi`, so
/// `lambda2` may exceed `pi` when the rectangle wraps the antimeridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoRect {
    pub lambda1: f64,
    pub phi1: f64,
    pub lambda2: f64,
    pub phi2: f64,
}

impl GeoRect {
    pub fn new(lambda1: f64, phi1: f64, lambda2: f64, phi2: f64) -> Self {
        Self {
            lambda1,
            phi1,
            lambda2,
            phi2,
        }
    }

    /// The whole sphere.
    pub fn full() -> Self {
        Self::new(-PI, -FRAC_PI_2, PI, FRAC_PI_2)
    }

    /// Zero-area rectangle at a single coordinate.
    pub fn point(geo: GeoCoord) -> Self {
        Self::new(geo.lambda, geo.phi, geo.lambda, geo.phi).normalized()
    }

    pub fn from_ranges(lambda: Range, phi: Range) -> Self {
        Self::new(lambda.min, phi.min, lambda.max, phi.max).normalized()
    }

    pub fn lambda_range(&self) -> Range {
        Range::new(self.lambda1, self.lambda2)
    }

    pub fn phi_range(&self) -> Range {
        Range::new(self.phi1, self.phi2)
    }

    pub fn width(&self) -> f64 {
        self.lambda2 - self.lambda1
    }

    pub fn height(&self) -> f64 {
        self.phi2 - self.phi1
    }

    pub fn is_full_circle(&self) -> bool {
        self.width() >= TAU
    }

    /// Bring `lambda1` into `[-pi, pi)`; a longitude span wider than a full
    /// turn collapses to the full circle. Latitudes are clamped to the
    /// sphere.
    pub fn normalized(&self) -> Self {
        let phi1 = self.phi1.clamp(-FRAC_PI_2, FRAC_PI_2);
        let phi2 = self.phi2.clamp(-FRAC_PI_2, FRAC_PI_2);
        if self.lambda2 - self.lambda1 > TAU {
            return Self::new(-PI, phi1, PI, phi2);
        }
        let lambda1 = normalize_lambda(self.lambda1);
        let d = self.lambda1 - lambda1;
        Self::new(lambda1, phi1, self.lambda2 - d, phi2)
    }

    /// Containment test that accounts for longitude periodicity.
    pub fn contains(&self, lambda: f64, phi: f64) -> bool {
        self.contains_with_tolerance(lambda, phi, 0.0)
    }

    pub fn contains_with_tolerance(&self, lambda: f64, phi: f64, tol: f64) -> bool {
        if phi < self.phi1 - tol || self.phi2 + tol < phi {
            return false;
        }
        if self.is_full_circle() {
            return true;
        }
        // offset of lambda east of lambda1, in [0, 2pi)
        let d = (lambda - self.lambda1).rem_euclid(TAU);
        d <= self.width() + tol || TAU - d <= tol
    }
}

/// Axis-aligned rectangle on the projected plane, corners in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rectangle {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn x_range(&self) -> Range {
        Range::new(self.x1, self.x2)
    }

    pub fn y_range(&self) -> Range {
        Range::new(self.y1, self.y2)
    }

    pub fn width(&self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Both extents are zero.
    pub fn is_point(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.x_range().contains(p.x) && self.y_range().contains(p.y)
    }

    /// Corners normalized so `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(&self) -> Self {
        let xr = self.x_range();
        let yr = self.y_range();
        Self::new(xr.min, yr.min, xr.max, yr.max)
    }
}
