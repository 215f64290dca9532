//! PyO3 bindings for point projection and inverse bounding boxes.

use ndarray::Array1;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::bounds::BoundedProjection;
use crate::geom::Rectangle;
use crate::proj::{AnyProjection, Projection, DEFAULT_DIV_N};

pub(crate) fn build_projection(
    projection: &str,
    lam0: f64,
    phi0: f64,
    div_n: usize,
) -> PyResult<AnyProjection> {
    AnyProjection::from_name(projection, lam0, phi0, div_n)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Geographic bounds of a projected rectangle.
///
/// Args:
///     projection: Projection name ("aeqd", "laea" or "tmerc").
///     lam0: Center longitude in radians.
///     phi0: Center latitude in radians.
///     rect: Projected rectangle as (x1, y1, x2, y2).
///     div_n: Number of discretization bins; larger gives tighter bounds.
///
/// Returns:
///     Tuple (lambda1, phi1, lambda2, phi2) in radians, lambda1 in [-pi, pi)
///     and lambda2 - lambda1 <= 2 pi.
#[pyfunction]
#[pyo3(signature = (projection, lam0, phi0, rect, div_n=180))]
pub fn inverse_bounding_box(
    py: Python<'_>,
    projection: &str,
    lam0: f64,
    phi0: f64,
    rect: (f64, f64, f64, f64),
    div_n: usize,
) -> PyResult<(f64, f64, f64, f64)> {
    let proj = build_projection(projection, lam0, phi0, div_n)?;
    let rect = Rectangle::new(rect.0, rect.1, rect.2, rect.3);
    let geo = py.allow_threads(move || proj.inverse_bounding_box(&rect));
    Ok((geo.lambda1, geo.phi1, geo.lambda2, geo.phi2))
}

/// Project arrays of coordinates, forward or inverse.
///
/// Args:
///     projection: Projection name ("aeqd", "laea" or "tmerc").
///     lam0: Center longitude in radians.
///     phi0: Center latitude in radians.
///     a: 1D array of longitudes (forward) or x coordinates (inverse).
///     b: 1D array of latitudes (forward) or y coordinates (inverse).
///     inverse: Run the inverse projection instead of the forward one.
///
/// Returns:
///     Tuple of output arrays; points outside the projection's domain are NaN.
#[pyfunction]
#[pyo3(signature = (projection, lam0, phi0, a, b, inverse=false))]
#[allow(clippy::type_complexity)]
pub fn project_points<'py>(
    py: Python<'py>,
    projection: &str,
    lam0: f64,
    phi0: f64,
    a: PyReadonlyArray1<'py, f64>,
    b: PyReadonlyArray1<'py, f64>,
    inverse: bool,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let a_view = a.as_array();
    let b_view = b.as_array();
    if a_view.len() != b_view.len() {
        return Err(PyValueError::new_err(format!(
            "a and b must have same length, got {} and {}",
            a_view.len(),
            b_view.len()
        )));
    }

    let proj = build_projection(projection, lam0, phi0, DEFAULT_DIV_N)?;
    let coords: Vec<(f64, f64)> = a_view
        .iter()
        .zip(b_view.iter())
        .map(|(&ai, &bi)| (ai, bi))
        .collect();

    let (xs, ys): (Vec<f64>, Vec<f64>) = py.allow_threads(move || {
        coords
            .into_iter()
            .map(|(ai, bi)| {
                if inverse {
                    proj.inverse(ai, bi)
                        .map_or((f64::NAN, f64::NAN), |g| (g.lambda, g.phi))
                } else {
                    proj.forward(ai, bi)
                        .map_or((f64::NAN, f64::NAN), |p| (p.x, p.y))
                }
            })
            .unzip()
    });

    Ok((
        PyArray1::from_owned_array(py, Array1::from(xs)),
        PyArray1::from_owned_array(py, Array1::from(ys)),
    ))
}
