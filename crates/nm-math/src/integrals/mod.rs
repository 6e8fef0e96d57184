//! Numerical integration.
//!
//! Provides the trapezoidal refinement step and Richardson extrapolation
//! step, and Romberg integration built from the two.

pub mod romberg;
pub mod table;

use nm_core::{ensure, ensure_finite, errors::Result, Real, Size};

pub use romberg::{
    romberg, romberg_report, RombergIntegral, RombergReport, Termination, DEFAULT_EPSILON,
    DEFAULT_MAX_LEVELS, MAX_LEVELS,
};
pub use table::RombergTable;

/// A numerical integrator.
pub trait Integrator {
    /// Integrate `f` on `[a, b]`.
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real>;
}

// ── Trapezoid ─────────────────────────────────────────────────────────────────

/// One step of the composite trapezoidal refinement recurrence.
///
/// `previous` is the estimate with `2^(level-1)` subintervals and `h` the
/// step of the refined grid, `(b - a) / 2^level`. Only the midpoints new at
/// this level are evaluated:
///
/// `T(level) = T(level-1) / 2 + h * Σ f(a + k h)` for odd `k < 2^level`.
///
/// Returns the refined estimate and the number of evaluations made, which
/// is always `2^(level-1)`. Fails on the first non-finite sample.
pub fn trapezoid_refine<F>(
    f: &F,
    a: Real,
    h: Real,
    level: Size,
    previous: Real,
) -> Result<(Real, Size)>
where
    F: Fn(Real) -> Real,
{
    ensure!(
        (1..MAX_LEVELS).contains(&level),
        "refinement level must be in [1, {MAX_LEVELS}), got {level}"
    );
    let intervals = num_traits::pow(2 as Size, level);
    let mut sum = 0.0;
    for k in (1..intervals).step_by(2) {
        let x = a + k as Real * h;
        let fx = f(x);
        ensure_finite!(x, fx);
        sum += fx;
    }
    Ok((0.5 * previous + h * sum, intervals / 2))
}

// ── Richardson ────────────────────────────────────────────────────────────────

/// One Richardson extrapolation step of the given `order` (≥ 1).
///
/// Combines the estimate from the finer grid with the one from the coarser
/// grid, cancelling the `h^(2 order)` term of the error expansion.
#[inline]
pub fn richardson(finer: Real, coarser: Real, order: Size) -> Real {
    let denominator = num_traits::pow(4.0 as Real, order) - 1.0;
    finer + (finer - coarser) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_refine_reuses_previous_estimate() {
        // ∫₀¹ x² dx with one interval is 0.5; halving adds f(0.5) only.
        let (t1, evals) = trapezoid_refine(&|x: Real| x * x, 0.0, 0.5, 1, 0.5).unwrap();
        assert_eq!(evals, 1);
        assert!((t1 - 0.375).abs() < 1e-15, "got {t1}");

        let (t2, evals) = trapezoid_refine(&|x: Real| x * x, 0.0, 0.25, 2, t1).unwrap();
        assert_eq!(evals, 2);
        assert!((t2 - 0.34375).abs() < 1e-15, "got {t2}");
    }

    #[test]
    fn trapezoid_refine_rejects_level_zero() {
        assert!(trapezoid_refine(&|x: Real| x, 0.0, 1.0, 0, 0.0).is_err());
    }

    #[test]
    fn trapezoid_refine_reports_bad_midpoint() {
        let f = |x: Real| if x > 0.7 { Real::NAN } else { x };
        let err = trapezoid_refine(&f, 0.0, 0.25, 2, 0.5).unwrap_err();
        assert_eq!(err.sample_point(), Some(0.75));
    }

    #[test]
    fn richardson_first_order_is_simpson() {
        // Trapezoid estimates of ∫₀¹ x² dx with 1 and 2 intervals.
        let simpson = richardson(0.375, 0.5, 1);
        assert!((simpson - 1.0 / 3.0).abs() < 1e-15, "got {simpson}");
    }

    #[test]
    fn richardson_is_identity_on_equal_estimates() {
        for order in 1..8 {
            assert_eq!(richardson(2.5, 2.5, order), 2.5);
        }
    }
}
