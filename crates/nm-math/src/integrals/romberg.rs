//! Romberg integration.
//!
//! Builds a triangular table whose first column is the trapezoidal rule on
//! `1, 2, 4, ...` subintervals and whose `j`-th column applies `j` rounds of
//! Richardson extrapolation. The diagonal is the sequence of best estimates;
//! refinement stops once two consecutive diagonal entries agree to within
//! `epsilon`, or when the level budget is spent.

use nm_core::{ensure, ensure_finite, errors::Result, Real, Size};
use tracing::{debug, trace, warn};

use super::{richardson, trapezoid_refine, Integrator, RombergTable};

/// Default convergence threshold on successive diagonal entries.
pub const DEFAULT_EPSILON: Real = 1e-8;

/// Default level budget for [`RombergIntegral::default`].
pub const DEFAULT_MAX_LEVELS: Size = 20;

/// Largest accepted level budget: level `n - 1` samples `2^(n-1)` points.
pub const MAX_LEVELS: Size = usize::BITS as Size;

/// Why a Romberg run stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// `|R[level][level] - R[level-1][level-1]| < epsilon`.
    Converged {
        /// The refinement level at which the check passed.
        level: Size,
        /// The diagonal difference that passed the check.
        delta: Real,
    },
    /// Every level of the budget was built without passing the check.
    BudgetExhausted,
    /// `a == b`; nothing was evaluated.
    DegenerateInterval,
}

/// Full outcome of a Romberg run.
#[derive(Debug, Clone, PartialEq)]
pub struct RombergReport {
    /// The estimate of the integral.
    pub value: Real,
    /// The table built, one row per refinement level.
    pub table: RombergTable,
    /// Number of integrand evaluations.
    pub evaluations: Size,
    /// Why the run stopped.
    pub termination: Termination,
}

impl RombergReport {
    fn degenerate() -> Self {
        Self {
            value: 0.0,
            table: RombergTable::new(),
            evaluations: 0,
            termination: Termination::DegenerateInterval,
        }
    }

    /// Number of refinement levels built.
    pub fn levels(&self) -> Size {
        self.table.rows()
    }

    /// `true` if the run stopped on the convergence check.
    pub fn converged(&self) -> bool {
        matches!(self.termination, Termination::Converged { .. })
    }
}

/// Integrate `f` over `[a, b]` with at most `n` refinement levels.
///
/// Returns the first diagonal entry `R[i][i]` within `epsilon` of its
/// predecessor, or `R[n-1][n-1]` if none is. `a == b` integrates to zero
/// without evaluating `f`.
///
/// # Errors
///
/// * [`Error::InvalidArgument`](nm_core::Error::InvalidArgument) if `n < 1`,
///   `n > MAX_LEVELS`, `epsilon` is not a positive finite number, or a
///   bound is not finite.
/// * [`Error::NonFiniteEvaluation`](nm_core::Error::NonFiniteEvaluation) on
///   the first sample where `f` is infinite or NaN.
///
/// # Example
/// ```
/// use nm_math::integrals::romberg;
///
/// // ∫₀¹ eˣ dx = e - 1
/// let value = romberg(|x| x.exp(), 0.0, 1.0, 10, 1e-10).unwrap();
/// assert!((value - (std::f64::consts::E - 1.0)).abs() < 1e-10);
/// ```
pub fn romberg<F>(f: F, a: Real, b: Real, n: Size, epsilon: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    romberg_report(f, a, b, n, epsilon).map(|report| report.value)
}

/// Like [`romberg`], but return the table, evaluation count and
/// termination reason along with the estimate.
pub fn romberg_report<F>(f: F, a: Real, b: Real, n: Size, epsilon: Real) -> Result<RombergReport>
where
    F: Fn(Real) -> Real,
{
    ensure!(n >= 1, "iteration budget must be >= 1, got {n}");
    ensure!(
        n <= MAX_LEVELS,
        "iteration budget must be <= {MAX_LEVELS}, got {n}"
    );
    ensure!(
        epsilon > 0.0 && epsilon.is_finite(),
        "convergence threshold must be positive and finite, got {epsilon}"
    );
    ensure!(
        a.is_finite() && b.is_finite(),
        "interval bounds must be finite, got [{a}, {b}]"
    );

    if a == b {
        debug!(a, "degenerate interval");
        return Ok(RombergReport::degenerate());
    }

    let mut h = b - a;
    let fa = f(a);
    ensure_finite!(a, fa);
    let fb = f(b);
    ensure_finite!(b, fb);

    let mut table = RombergTable::with_capacity(n.min(DEFAULT_MAX_LEVELS));
    table.push_row(&[0.5 * h * (fa + fb)]);
    let mut evaluations: Size = 2;
    let mut row: Vec<Real> = Vec::with_capacity(n.min(DEFAULT_MAX_LEVELS));

    for i in 1..n {
        h *= 0.5;
        let previous = table.row(i - 1).unwrap_or_default();
        let (trapezoid, added) = trapezoid_refine(&f, a, h, i, previous[0])?;
        evaluations += added;

        row.clear();
        row.push(trapezoid);
        for j in 1..=i {
            let cell = richardson(row[j - 1], previous[j - 1], j);
            trace!(i, j, cell, "extrapolated");
            row.push(cell);
        }
        let estimate = row[i];
        let delta = (estimate - previous[i - 1]).abs();
        table.push_row(&row);
        debug!(level = i, h, trapezoid, estimate, delta, "romberg refinement");

        if delta < epsilon {
            return Ok(RombergReport {
                value: estimate,
                table,
                evaluations,
                termination: Termination::Converged { level: i, delta },
            });
        }
    }

    let value = table.best().unwrap_or_default();
    if n > 1 {
        warn!(levels = n, epsilon, value, "romberg budget exhausted before convergence");
    }
    Ok(RombergReport {
        value,
        table,
        evaluations,
        termination: Termination::BudgetExhausted,
    })
}

// ── Integrator ────────────────────────────────────────────────────────────────

/// Romberg integration with a fixed level budget and threshold.
#[derive(Debug, Clone)]
pub struct RombergIntegral {
    max_levels: Size,
    epsilon: Real,
}

impl RombergIntegral {
    /// Create a new Romberg integrator.
    pub fn new(epsilon: Real, max_levels: Size) -> Self {
        Self {
            max_levels,
            epsilon,
        }
    }

    /// The level budget.
    pub fn max_levels(&self) -> Size {
        self.max_levels
    }

    /// The convergence threshold.
    pub fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Integrate `f` on `[a, b]` and return the full report.
    pub fn report<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<RombergReport> {
        romberg_report(f, a, b, self.max_levels, self.epsilon)
    }
}

impl Default for RombergIntegral {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON, DEFAULT_MAX_LEVELS)
    }
}

impl Integrator for RombergIntegral {
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real> {
        romberg(f, a, b, self.max_levels, self.epsilon)
    }
}
