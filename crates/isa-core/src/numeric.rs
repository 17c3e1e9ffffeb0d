//! Float checks shared by the model crates.

use crate::error::{IsaError, IsaResult};

/// Absolute and relative slack for comparing model outputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    /// Relative-only slack, for pressure and density which fall by three
    /// orders of magnitude between sea level and 47 km.
    pub const fn relative(rel: f64) -> Self {
        Self { abs: 0.0, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within either bound of `tol`.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(value: f64, what: &'static str) -> IsaResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(IsaError::NonFinite { what, value })
    }
}

/// Physical constants are magnitudes; zero or a negative sign is a typo.
pub fn ensure_positive(value: f64, what: &'static str) -> IsaResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(IsaError::NonPositive { what, value })
    }
}
