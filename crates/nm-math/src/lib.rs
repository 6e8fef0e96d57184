//! # nm-math
//!
//! Numerical integration: Romberg's method built on the trapezoidal
//! refinement recurrence and Richardson extrapolation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// 1D numerical integration.
pub mod integrals;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use integrals::{
    romberg, romberg_report, Integrator, RombergIntegral, RombergReport, RombergTable,
    Termination, DEFAULT_EPSILON,
};
