//! `numsim` implements classical composite quadrature and dense Gaussian
//! elimination.
//!
//! The quadrature family covers the midpoint and trapezoidal rules in one
//! dimension (scalar, batch and SIMD forms), their composition into two and
//! three dimensions, an N-dimensional product midpoint rule, and a harness for
//! empirical convergence studies.

pub mod benchmark;
pub mod convergence;
pub mod error;
pub mod grid;
pub mod integrand;
pub mod linalg;
pub mod multidim;
pub mod quadrature;

pub use convergence::{
    convergence_test, convergence_test_double, convergence_test_triple, ConvergenceTest, Sample,
};
pub use error::SolveError;
pub use integrand::{FnIntegrand, Integrand};
pub use linalg::{gauss_elim, solve};
pub use multidim::{
    midpoint_double1, midpoint_double2, midpoint_triple1, midpoint_triple2, ProductMidpoint,
    Strategy,
};
pub use quadrature::{
    midpoint, midpoint_simd, midpoint_vectorized, trapezoidal, trapezoidal_simd,
    trapezoidal_vectorized, Rule,
};
