use pyo3::prelude::*;

mod bounds;
mod graticule;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(bounds::inverse_bounding_box, m)?)?;
    m.add_function(wrap_pyfunction!(bounds::project_points, m)?)?;
    m.add_function(wrap_pyfunction!(graticule::graticule_lines, m)?)?;
    Ok(())
}
