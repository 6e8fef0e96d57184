//! Configuration and dispatch for the `numerics` command-line driver.
//!
//! A run is fully described by a [`DriverConfig`]: which sample integrand
//! to integrate, over which interval, with which level budget and
//! threshold. [`dispatch`] performs the integration and writes a plain-text
//! report.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use nm_core::{Real, Size};
use nm_math::integrals::{romberg_report, RombergReport, Termination, DEFAULT_EPSILON};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{DriverError, Result};

/// Sample integrands from the numerical-analysis course material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Integrand {
    /// `1 / (2 + x^4)`
    #[default]
    InverseQuartic,
    /// `x^2`
    Square,
    /// `exp(x^2)`
    GaussianGrowth,
    /// `sin(x)`
    Sine,
    /// `exp(x)`
    Exp,
}

impl Integrand {
    /// Evaluate the integrand at `x`.
    pub fn eval(self, x: Real) -> Real {
        match self {
            Integrand::InverseQuartic => 1.0 / (2.0 + x.powi(4)),
            Integrand::Square => x * x,
            Integrand::GaussianGrowth => (x * x).exp(),
            Integrand::Sine => x.sin(),
            Integrand::Exp => x.exp(),
        }
    }

    /// Human-readable formula.
    pub fn formula(self) -> &'static str {
        match self {
            Integrand::InverseQuartic => "1/(2+x^4)",
            Integrand::Square => "x^2",
            Integrand::GaussianGrowth => "exp(x^2)",
            Integrand::Sine => "sin(x)",
            Integrand::Exp => "exp(x)",
        }
    }
}

/// Everything a driver run needs.
///
/// The defaults reproduce the classic demo: `1/(2+x^4)` on `[0, 1]` with
/// five levels. Missing keys in a TOML file fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// The function to integrate.
    pub integrand: Integrand,
    /// Lower bound.
    pub a: Real,
    /// Upper bound.
    pub b: Real,
    /// Level budget.
    pub levels: Size,
    /// Convergence threshold.
    pub epsilon: Real,
    /// Print the full Romberg table.
    pub show_table: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            integrand: Integrand::default(),
            a: 0.0,
            b: 1.0,
            levels: 5,
            epsilon: DEFAULT_EPSILON,
            show_table: false,
        }
    }
}

impl DriverConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DriverError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Run the integration described by `config` and write the report to `out`.
pub fn dispatch<W: Write>(config: &DriverConfig, out: &mut W) -> Result<RombergReport> {
    let integrand = config.integrand;
    info!(
        integrand = integrand.formula(),
        a = config.a,
        b = config.b,
        levels = config.levels,
        epsilon = config.epsilon,
        "dispatching romberg integration"
    );

    let report = romberg_report(
        |x| integrand.eval(x),
        config.a,
        config.b,
        config.levels,
        config.epsilon,
    )?;

    writeln!(
        out,
        "Romberg integration of f(x) = {} on [{}, {}]",
        integrand.formula(),
        config.a,
        config.b
    )?;
    writeln!(
        out,
        "Level budget n={}, epsilon={:e}",
        config.levels, config.epsilon
    )?;
    if config.show_table && !report.table.is_empty() {
        writeln!(out)?;
        write!(out, "{}", report.table)?;
        writeln!(out)?;
    }
    match report.termination {
        Termination::Converged { level, delta } => writeln!(
            out,
            "Converged at level {level} (|R[{level}][{level}] - R[{prev}][{prev}]| = {delta:e}), {} evaluations",
            report.evaluations,
            prev = level - 1,
        )?,
        Termination::BudgetExhausted => writeln!(
            out,
            "Budget exhausted after {} levels, {} evaluations",
            report.levels(),
            report.evaluations
        )?,
        Termination::DegenerateInterval => writeln!(out, "Degenerate interval, no evaluations")?,
    }
    writeln!(
        out,
        "Approximate integral in range [{}, {}] is {}",
        config.a, config.b, report.value
    )?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn run(config: &DriverConfig) -> (RombergReport, String) {
        let mut out = Vec::new();
        let report = dispatch(config, &mut out).unwrap();
        (report, String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_config_runs_the_demo() {
        let (report, text) = run(&DriverConfig::default());
        assert_abs_diff_eq!(report.value, 0.460_394_189_565_825, epsilon = 1e-12);
        assert!(text.starts_with("Romberg integration of f(x) = 1/(2+x^4) on [0, 1]"));
        assert!(text.contains("Level budget n=5, epsilon=1e-8"));
        assert!(text.contains("Budget exhausted after 5 levels, 17 evaluations"));
        assert!(text.contains("Approximate integral in range [0, 1] is 0.4603941"));
    }

    #[test]
    fn table_is_printed_on_request() {
        let config = DriverConfig {
            integrand: Integrand::Square,
            show_table: true,
            ..DriverConfig::default()
        };
        let (report, text) = run(&config);
        assert_eq!(report.levels(), 3);
        assert!(text.contains("Converged at level 2"));
        // Header, budget, blank, three rows, blank, termination, result.
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn degenerate_interval_reports_zero() {
        let config = DriverConfig {
            a: 2.0,
            b: 2.0,
            show_table: true,
            ..DriverConfig::default()
        };
        let (report, text) = run(&config);
        assert_eq!(report.value, 0.0);
        assert!(text.contains("Degenerate interval"));
        assert!(text.ends_with("is 0\n"));
    }

    #[test]
    fn integration_errors_are_wrapped() {
        let config = DriverConfig {
            levels: 0,
            ..DriverConfig::default()
        };
        let err = dispatch(&config, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Integration(nm_core::Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = DriverConfig::from_toml(
            r#"
            integrand = "gaussian-growth"
            levels = 8
            show_table = true
            "#,
        )
        .unwrap();
        assert_eq!(config.integrand, Integrand::GaussianGrowth);
        assert_eq!(config.levels, 8);
        assert!(config.show_table);
        assert_eq!(config.a, 0.0);
        assert_eq!(config.b, 1.0);
        assert_eq!(config.epsilon, DEFAULT_EPSILON);
    }

    #[test]
    fn toml_rejects_unknown_integrands_and_keys() {
        assert!(matches!(
            DriverConfig::from_toml(r#"integrand = "tangent""#),
            Err(DriverError::Config(_))
        ));
        assert!(matches!(
            DriverConfig::from_toml("iterations = 3"),
            Err(DriverError::Config(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = DriverConfig::from_file("/nonexistent/numerics.toml").unwrap();
        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn integrands_evaluate() {
        assert_eq!(Integrand::InverseQuartic.eval(1.0), 1.0 / 3.0);
        assert_eq!(Integrand::Square.eval(3.0), 9.0);
        assert_eq!(Integrand::GaussianGrowth.eval(0.0), 1.0);
        assert_eq!(Integrand::Sine.eval(0.0), 0.0);
        assert_eq!(Integrand::Exp.eval(0.0), 1.0);
    }
}
