//! Error types for the numerics workspace.
//!
//! Every routine reports failure through a single `thiserror`-derived enum.
//! Argument checks go through the [`ensure!`](crate::ensure) macro and sample
//! checks through [`ensure_finite!`](crate::ensure_finite).

use thiserror::Error;

use crate::Real;

/// The error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An argument was rejected before any computation took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The integrand produced infinity or NaN at a sample point.
    #[error("non-finite evaluation: f({x}) = {value}")]
    NonFiniteEvaluation {
        /// The abscissa at which the integrand was evaluated.
        x: Real,
        /// The value it returned.
        value: Real,
    },
}

impl Error {
    /// The offending sample point, for [`Error::NonFiniteEvaluation`].
    pub fn sample_point(&self) -> Option<Real> {
        match self {
            Error::NonFiniteEvaluation { x, .. } => Some(*x),
            Error::InvalidArgument(_) => None,
        }
    }
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use nm_core::{ensure, errors::Error};
/// fn positive(x: f64) -> nm_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::NonFiniteEvaluation { x, value })` unless `$value`
/// is finite.
///
/// # Example
/// ```
/// use nm_core::{ensure_finite, errors::Error};
/// fn sample(x: f64) -> nm_core::errors::Result<f64> {
///     let fx = 1.0 / x;
///     ensure_finite!(x, fx);
///     Ok(fx)
/// }
/// assert_eq!(sample(2.0), Ok(0.5));
/// assert_eq!(sample(0.0).unwrap_err().sample_point(), Some(0.0));
/// ```
#[macro_export]
macro_rules! ensure_finite {
    ($x:expr, $value:expr) => {
        let value: $crate::Real = $value;
        if !value.is_finite() {
            return Err($crate::errors::Error::NonFiniteEvaluation { x: $x, value });
        }
    };
}
