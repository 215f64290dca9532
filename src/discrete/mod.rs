//! Discretized interval math.
//!
//! A 1-D coordinate is split into equal-width bins; for each bin index and a
//! second, fixed coordinate the tables give sound lower and upper bounds of
//! the nonlinear sub-expressions appearing in the inverse projections.

pub mod azimuthal;
pub mod periodic;

pub use azimuthal::{EqualArea, Equidistant, RadialProfile, RadialTable};
pub use periodic::PeriodicTable;
