//! Error types for the linear system solver.
//!
//! The quadrature rules have no error type: they return plain `f64` values and
//! follow IEEE-754 semantics for degenerate input.

use thiserror::Error;

/// Errors that can occur while solving `Ax = b` by Gaussian elimination.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// A diagonal entry used as a divisor is exactly zero. No row exchange is
    /// attempted.
    #[error("Zero pivot at row {row}: elimination without pivoting cannot proceed")]
    ZeroPivot { row: usize },
    #[error("Coefficient matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Right-hand side length mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
