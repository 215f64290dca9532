#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod error;
pub mod geom;
pub mod affine;
pub mod proj;
pub mod discrete;
pub mod bounds;
pub mod graticule;
#[cfg(feature = "python")]
mod py;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn raster_proj(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
