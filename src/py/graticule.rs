//! PyO3 binding for graticule generation.

use numpy::PyArray2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::geom::Rectangle;
use crate::graticule::{GraticuleConfig, GraticuleGenerator};
use crate::proj::DEFAULT_DIV_N;
use crate::py::bounds::build_projection;

/// Graticule polylines crossing a view window.
///
/// Args:
///     projection: Projection name ("aeqd", "laea" or "tmerc").
///     lam0: Center longitude in radians.
///     phi0: Center latitude in radians.
///     view_rect: Projected view window as (x1, y1, x2, y2).
///     span_deg: Spacing of meridians and parallels in degrees.
///     threshold: Largest projected distance between consecutive samples.
///     max_vertices: Vertex limit per returned buffer.
///
/// Returns:
///     List of (kind, value, buffers) where kind is "meridian" or "parallel",
///     value is the fixed coordinate in radians and buffers is a list of
///     float32 arrays of shape (n, 2) in screen coordinates [-1, 1].
#[pyfunction]
#[pyo3(signature = (projection, lam0, phi0, view_rect, span_deg=10.0, threshold=None, max_vertices=None))]
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn graticule_lines<'py>(
    py: Python<'py>,
    projection: &str,
    lam0: f64,
    phi0: f64,
    view_rect: (f64, f64, f64, f64),
    span_deg: f64,
    threshold: Option<f64>,
    max_vertices: Option<usize>,
) -> PyResult<Vec<(&'static str, f64, Vec<Bound<'py, PyArray2<f32>>>)>> {
    let proj = build_projection(projection, lam0, phi0, DEFAULT_DIV_N)?;
    let defaults = GraticuleConfig::default();
    let config = GraticuleConfig {
        threshold: threshold.unwrap_or(defaults.threshold),
        max_vertices: max_vertices.unwrap_or(defaults.max_vertices),
        ..defaults
    };
    let view = Rectangle::new(view_rect.0, view_rect.1, view_rect.2, view_rect.3);

    let lines = py.allow_threads(move || {
        GraticuleGenerator::new(&proj, config)
            .and_then(|gen| gen.generate(&view, span_deg))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(lines
        .into_iter()
        .map(|line| {
            let buffers = line
                .chunks
                .iter()
                .map(|c| PyArray2::from_owned_array(py, c.to_vertex_buffer()))
                .collect();
            (line.kind.name(), line.value, buffers)
        })
        .collect())
}
