//! Composite midpoint and trapezoidal rules in one dimension.
//!
//! Each rule comes in three forms that share the same sample points and the
//! same summation order:
//!
//! * a scalar loop (`midpoint`, `trapezoidal`),
//! * a batch form that builds the whole sample vector, evaluates it with
//!   rayon and then reduces (`*_vectorized`); its result is bit-for-bit equal
//!   to the scalar loop,
//! * a SIMD form evaluating four lanes of `wide::f64x4` per call (`*_simd`).
//!
//! None of the rules validate their input. They are defined for `a < b` and
//! `n >= 1`; anything else yields whatever IEEE-754 arithmetic produces
//! (`NaN`, `inf` or `0.0`).

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use wide::f64x4;

use crate::grid::Grid;

/// Composite trapezoidal rule for `∫ₐᵇ f(x) dx` with `n` subintervals.
///
/// The endpoints carry weight `1/2` and the `n - 1` interior nodes weight `1`.
pub fn trapezoidal<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let grid = Grid::new(n, (a, b));
    let mut result = 0.5 * (f(a) + f(b));
    for x in grid.interior_nodes() {
        result += f(x);
    }
    result * grid.width()
}

/// Composite midpoint rule for `∫ₐᵇ f(x) dx` with `n` subintervals.
pub fn midpoint<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let grid = Grid::new(n, (a, b));
    let mut result = 0.0;
    for x in grid.midpoints() {
        result += f(x);
    }
    result * grid.width()
}

/// Batch form of [`trapezoidal`].
///
/// The interior nodes are generated up front and evaluated in parallel.
pub fn trapezoidal_vectorized<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    let grid = Grid::new(n, (a, b));
    let nodes: Vec<f64> = grid.interior_nodes().collect();
    let values = eval_batch(&f, &nodes);
    let result = values.iter().fold(0.5 * (f(a) + f(b)), |acc, v| acc + v);
    result * grid.width()
}

/// Batch form of [`midpoint`].
pub fn midpoint_vectorized<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64 + Sync,
{
    let grid = Grid::new(n, (a, b));
    let points: Vec<f64> = grid.midpoints().collect();
    let values = eval_batch(&f, &points);
    values.iter().fold(0.0, |acc, v| acc + v) * grid.width()
}

/// SIMD form of [`trapezoidal`], with `f` evaluated on packets of four points.
///
/// # Examples
///
/// ```
/// use numsim::quadrature::trapezoidal_simd;
/// use wide::f64x4;
///
/// let area = trapezoidal_simd(|x: f64x4| x * x, 0.0, 1.0, 1000);
/// assert!((area - 1.0 / 3.0).abs() < 1e-6);
/// ```
pub fn trapezoidal_simd<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64x4) -> f64x4,
{
    let grid = Grid::new(n, (a, b));
    let ends = eval_simd(&f, &[a, b]);
    let nodes: Vec<f64> = grid.interior_nodes().collect();
    let values = eval_simd(&f, &nodes);
    let result = values
        .iter()
        .fold(0.5 * (ends[0] + ends[1]), |acc, v| acc + v);
    result * grid.width()
}

/// SIMD form of [`midpoint`], with `f` evaluated on packets of four points.
pub fn midpoint_simd<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64x4) -> f64x4,
{
    let grid = Grid::new(n, (a, b));
    let points: Vec<f64> = grid.midpoints().collect();
    let values = eval_simd(&f, &points);
    values.iter().fold(0.0, |acc, v| acc + v) * grid.width()
}

/// Evaluates `f` on every point in parallel. The output keeps the input order.
fn eval_batch<F>(f: &F, points: &[f64]) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Sync,
{
    points.par_iter().map(|&x| f(x)).collect()
}

/// Evaluates `f` four points at a time. A trailing partial packet is padded
/// with its last point and the padded lanes are dropped.
fn eval_simd<F>(f: &F, points: &[f64]) -> Vec<f64>
where
    F: Fn(f64x4) -> f64x4,
{
    let mut values = Vec::with_capacity(points.len());
    for chunk in points.chunks(4) {
        let mut lanes = [chunk[chunk.len() - 1]; 4];
        lanes[..chunk.len()].copy_from_slice(chunk);
        let out = f(f64x4::from(lanes)).to_array();
        values.extend_from_slice(&out[..chunk.len()]);
    }
    values
}

/// The closure-based one-dimensional rules, selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Midpoint,
    Trapezoidal,
    MidpointVectorized,
    TrapezoidalVectorized,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::Midpoint,
        Rule::MidpointVectorized,
        Rule::Trapezoidal,
        Rule::TrapezoidalVectorized,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Midpoint => "midpoint",
            Rule::Trapezoidal => "trapezoidal",
            Rule::MidpointVectorized => "midpoint_vectorized",
            Rule::TrapezoidalVectorized => "trapezoidal_vectorized",
        }
    }

    /// Applies the rule to `f` over `[a, b]` with `n` subintervals.
    pub fn integrate<F>(&self, f: F, a: f64, b: f64, n: usize) -> f64
    where
        F: Fn(f64) -> f64 + Sync,
    {
        match self {
            Rule::Midpoint => midpoint(f, a, b, n),
            Rule::Trapezoidal => trapezoidal(f, a, b, n),
            Rule::MidpointVectorized => midpoint_vectorized(f, a, b, n),
            Rule::TrapezoidalVectorized => trapezoidal_vectorized(f, a, b, n),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "midpoint" => Ok(Rule::Midpoint),
            "trapezoidal" => Ok(Rule::Trapezoidal),
            "midpoint_vectorized" => Ok(Rule::MidpointVectorized),
            "trapezoidal_vectorized" => Ok(Rule::TrapezoidalVectorized),
            _ => Err(format!("Unknown rule: {}", s)),
        }
    }
}
