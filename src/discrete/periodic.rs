//! Bin tables for the transverse Mercator inverse.
//!
//! TMERC inverts through `sinh x`, `1 / cosh x` and the trig functions of
//! `y + phi0`. Bins have width `pi / div_n` on both axes.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::geom::Range;

/// Range of `sin` over a closed interval.
pub fn sin_range(r: Range) -> Range {
    if r.width() >= TAU {
        return Range::new(-1.0, 1.0);
    }
    let a = r.min.sin();
    let b = r.max.sin();
    let mut min = a.min(b);
    let mut max = a.max(b);
    if contains_phase(r, FRAC_PI_2) {
        max = 1.0;
    }
    if contains_phase(r, -FRAC_PI_2) {
        min = -1.0;
    }
    Range { min, max }
}

/// Range of `cos` over a closed interval.
pub fn cos_range(r: Range) -> Range {
    sin_range(r.shift(FRAC_PI_2))
}

/// Whether `phase + 2 k pi` lies in `r` for some integer `k`.
fn contains_phase(r: Range, phase: f64) -> bool {
    let k = ((r.min - phase) / TAU).ceil();
    phase + k * TAU <= r.max
}

#[derive(Clone, Copy, Debug)]
pub struct PeriodicTable {
    div_n: usize,
    unit: f64,
}

impl PeriodicTable {
    pub fn new(div_n: usize) -> Self {
        Self {
            div_n,
            unit: PI / div_n as f64,
        }
    }

    pub fn div_n(&self) -> usize {
        self.div_n
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    #[inline]
    pub fn to_discrete(&self, t: f64) -> i64 {
        (t / self.unit).floor() as i64
    }

    #[inline]
    pub fn bin(&self, idx: i64) -> Range {
        Range::new(idx as f64 * self.unit, (idx + 1) as f64 * self.unit)
    }

    /// `sinh` is increasing, so the bin ends bound it.
    pub fn sinh(&self, idx: i64) -> Range {
        self.bin(idx).map_increasing(f64::sinh)
    }

    /// Bounds of `1 / cosh x` over the bin; largest at the end nearest zero.
    pub fn sech(&self, idx: i64) -> Range {
        let b = self.bin(idx);
        let (near, far) = if idx >= 0 {
            (b.min, b.max)
        } else {
            (-b.max, -b.min)
        };
        Range::new(1.0 / far.cosh(), 1.0 / near.cosh())
    }

    /// Bounds of `sin(y + shift)` for `y` in the bin.
    pub fn sin_shifted(&self, idx: i64, shift: f64) -> Range {
        sin_range(self.bin(idx).shift(shift))
    }

    /// Bounds of `cos(y + shift)` for `y` in the bin.
    pub fn cos_shifted(&self, idx: i64, shift: f64) -> Range {
        cos_range(self.bin(idx).shift(shift))
    }
}
