//! # nm-core
//!
//! Core type aliases and the error hierarchy shared by the numerics
//! workspace crates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` / `ensure_finite!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for table sizes, level counts and indices.
pub type Size = usize;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
