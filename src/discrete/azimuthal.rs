//! Bin tables for the azimuthal projections.
//!
//! Both AEQD and LAEA invert through the angular distance `c(rho)` from the
//! center, where `rho = sqrt(x^2 + y^2)`. One coordinate is discretized into
//! bins of width `domain / div_n`; the other is a fixed edge value `p`. Over
//! a bin, `rho` is bounded by the bin's nearest and farthest `|t|` from zero,
//! and every sub-expression below is monotone in `rho` except `sin c`, which
//! peaks where `c = pi/2`.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::geom::Range;
use crate::proj::math::{clamp_unit, EPSILON, SQRT_2};

/// Relation between planar radius and angular distance for one family.
pub trait RadialProfile: Copy + Debug + Send + Sync + 'static {
    /// Radius of the projected disc.
    const DOMAIN: f64;
    /// Radius at which the angular distance is `pi/2`.
    const HALF: f64;

    /// Angular distance `c` for a planar radius inside the disc.
    fn angle(rho: f64) -> f64;
}

/// AEQD: `c = rho`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Equidistant;

impl RadialProfile for Equidistant {
    const DOMAIN: f64 = PI;
    const HALF: f64 = FRAC_PI_2;

    #[inline]
    fn angle(rho: f64) -> f64 {
        rho
    }
}

/// LAEA: `c = 2 asin(rho / 2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqualArea;

impl RadialProfile for EqualArea {
    const DOMAIN: f64 = 2.0;
    const HALF: f64 = SQRT_2;

    #[inline]
    fn angle(rho: f64) -> f64 {
        2.0 * clamp_unit(rho / 2.0).asin()
    }
}

/// Discretized bound functions of `c(sqrt(t^2 + p^2))`.
#[derive(Clone, Copy, Debug)]
pub struct RadialTable<P: RadialProfile> {
    div_n: usize,
    unit: f64,
    _profile: PhantomData<P>,
}

impl<P: RadialProfile> RadialTable<P> {
    pub fn new(div_n: usize) -> Self {
        Self {
            div_n,
            unit: P::DOMAIN / div_n as f64,
            _profile: PhantomData,
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

    /// `[idx * unit, (idx + 1) * unit]`
    #[inline]
    pub fn bin(&self, idx: i64) -> Range {
        Range::new(idx as f64 * self.unit, (idx + 1) as f64 * self.unit)
    }

    fn near_rho(&self, idx: i64, p: f64) -> f64 {
        let t = if idx >= 0 {
            idx as f64 * self.unit
        } else {
            (-idx - 1) as f64 * self.unit
        };
        t.hypot(p)
    }

    fn far_rho(&self, idx: i64, p: f64) -> f64 {
        let t = if idx >= 0 {
            (idx + 1) as f64 * self.unit
        } else {
            -idx as f64 * self.unit
        };
        t.hypot(p)
    }

    fn cos_at(rho: f64) -> f64 {
        if rho <= P::DOMAIN {
            P::angle(rho).cos()
        } else {
            -1.0
        }
    }

    fn sin_at(rho: f64) -> f64 {
        if rho < P::DOMAIN {
            P::angle(rho).sin()
        } else {
            0.0
        }
    }

    fn r_cot_at(rho: f64) -> f64 {
        if rho < EPSILON {
            return 1.0;
        }
        if rho < P::DOMAIN {
            rho / P::angle(rho).tan()
        } else {
            f64::NEG_INFINITY
        }
    }

    fn sin_div_at(rho: f64) -> f64 {
        if rho < EPSILON {
            return 1.0;
        }
        if rho < P::DOMAIN {
            P::angle(rho).sin() / rho
        } else {
            0.0
        }
    }

    /// Bounds of `cos c` over bin `idx` with the other coordinate at `p`.
    pub fn cos_r(&self, idx: i64, p: f64) -> Range {
        Range::new(
            Self::cos_at(self.far_rho(idx, p)),
            Self::cos_at(self.near_rho(idx, p)),
        )
    }

    /// Bounds of `sin c`; rises up to `HALF` and falls after it.
    pub fn sin_r(&self, idx: i64, p: f64) -> Range {
        let near = self.near_rho(idx, p);
        let far = self.far_rho(idx, p);
        let v_near = Self::sin_at(near);
        let v_far = Self::sin_at(far);
        if far <= P::HALF {
            Range::new(v_near, v_far)
        } else if P::HALF <= near {
            Range::new(v_far, v_near)
        } else {
            Range::new(v_near.min(v_far), 1.0)
        }
    }

    /// Bounds of `rho cot c`, which falls from 1 at the center to `-inf` at
    /// the rim.
    pub fn r_cot_r(&self, idx: i64, p: f64) -> Range {
        Range::new(
            Self::r_cot_at(self.far_rho(idx, p)),
            Self::r_cot_at(self.near_rho(idx, p)),
        )
    }

    /// Bounds of `sin c / rho`, which falls from 1 at the center to 0 at the
    /// rim.
    pub fn sin_r_div_r(&self, idx: i64, p: f64) -> Range {
        Range::new(
            Self::sin_div_at(self.far_rho(idx, p)),
            Self::sin_div_at(self.near_rho(idx, p)),
        )
    }
}
