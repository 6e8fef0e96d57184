//! # numerics
//!
//! Romberg integration for one-dimensional real functions.
//!
//! This crate is a **façade** that re-exports the workspace crates and
//! hosts the command-line driver. Application code should depend on this
//! crate rather than the individual `nm-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use numerics::math::integrals::{romberg, DEFAULT_EPSILON};
//!
//! // ∫₀¹ x² dx = 1/3
//! let value = romberg(|x| x * x, 0.0, 1.0, 5, DEFAULT_EPSILON).unwrap();
//! assert!((value - 1.0 / 3.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core type aliases and error definitions.
pub use nm_core as core;

/// Numerical integration.
pub use nm_math as math;

/// Driver configuration and dispatch for the `numerics` binary.
pub mod driver;

/// Driver error types.
pub mod error;

pub use driver::{dispatch, DriverConfig, Integrand};
pub use error::{DriverError, Result};
