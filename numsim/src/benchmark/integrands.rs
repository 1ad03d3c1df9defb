//! Standard integrands with known integrals.
use crate::integrand::Integrand;
use wide::f64x4;

use libm::erf;
use std::f64::consts::{E, PI};

/// Returns the parameters for the Genz test functions.
fn genz_params(dim: usize) -> (Vec<f64>, Vec<f64>) {
    let mut c = Vec::with_capacity(dim);
    let mut w = Vec::with_capacity(dim);
    for i in 1..=dim {
        c.push(1.0 + 4.0 * ((i as f64).sqrt() * 12345.).fract());
        w.push(((i as f64).sqrt() * 54321.).fract());
    }
    (c, w)
}

// f(t) = 3t² exp(t³)
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicExp;

impl CubicExp {
    pub fn value(t: f64) -> f64 {
        3.0 * t.powi(2) * t.powi(3).exp()
    }

    pub fn value_simd(t: f64x4) -> f64x4 {
        f64x4::splat(3.0) * t * t * (t * t * t).exp()
    }

    pub fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// `∫₀¹ 3t² exp(t³) dt = e - 1`
    pub fn analytical_result(&self) -> f64 {
        E - 1.0
    }
}

impl Integrand for CubicExp {
    fn dim(&self) -> usize {
        1
    }

    fn eval(&self, x: &[f64]) -> f64 {
        Self::value(x[0])
    }
}

// Affine function γ + Σ αᵢxᵢ
#[derive(Debug, Clone)]
pub struct Affine {
    alpha: Vec<f64>,
    gamma: f64,
    boundaries: Vec<(f64, f64)>,
}

impl Affine {
    pub fn new(alpha: &[f64], gamma: f64, boundaries: &[(f64, f64)]) -> Self {
        assert_eq!(
            alpha.len(),
            boundaries.len(),
            "One coefficient is required per dimension."
        );
        Self {
            alpha: alpha.to_vec(),
            gamma,
            boundaries: boundaries.to_vec(),
        }
    }

    /// `2x + y` over `[0, 2] × [2, 3]`, whose integral is 9.
    pub fn plane() -> Self {
        Self::new(&[2.0, 1.0], 0.0, &[(0.0, 2.0), (2.0, 3.0)])
    }

    pub fn boundaries(&self) -> &[(f64, f64)] {
        &self.boundaries
    }

    /// The box volume times the value at the box centre.
    pub fn analytical_result(&self) -> f64 {
        let mut volume = 1.0;
        let mut centre_value = self.gamma;
        for (&a, &(min, max)) in self.alpha.iter().zip(&self.boundaries) {
            volume *= max - min;
            centre_value += a * 0.5 * (min + max);
        }
        volume * centre_value
    }
}

impl Integrand for Affine {
    fn dim(&self) -> usize {
        self.alpha.len()
    }

    fn eval(&self, x: &[f64]) -> f64 {
        let mut sum = self.gamma;
        for (a, xi) in self.alpha.iter().zip(x) {
            sum += a * xi;
        }
        sum
    }
}

// exp(-|x|²) over the cube [-1, 1]^dim
#[derive(Debug, Clone, Copy)]
pub struct Gaussian {
    dim: usize,
}

impl Gaussian {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn boundaries(&self) -> Vec<(f64, f64)> {
        vec![(-1.0, 1.0); self.dim]
    }

    pub fn analytical_result(&self) -> f64 {
        (PI.sqrt() * erf(1.0)).powi(self.dim as i32)
    }
}

impl Integrand for Gaussian {
    fn dim(&self) -> usize {
        self.dim
    }

    fn eval(&self, x: &[f64]) -> f64 {
        let sum: f64 = x.iter().map(|xi| xi * xi).sum();
        (-sum).exp()
    }
}

// Genz Product Peak over the unit cube
#[derive(Debug, Clone)]
pub struct GenzProductPeak {
    dim: usize,
    c: Vec<f64>,
    w: Vec<f64>,
}

impl GenzProductPeak {
    pub fn new(dim: usize) -> Self {
        let (c, w) = genz_params(dim);
        Self { dim, c, w }
    }

    pub fn boundaries(&self) -> Vec<(f64, f64)> {
        vec![(0.0, 1.0); self.dim]
    }

    /// `Π c (atan(c(1 - w)) + atan(cw))`
    pub fn analytical_result(&self) -> f64 {
        let mut result = 1.0;
        for i in 0..self.dim {
            let (c, w) = (self.c[i], self.w[i]);
            result *= c * ((c * (1. - w)).atan() + (c * w).atan());
        }
        result
    }
}

impl Integrand for GenzProductPeak {
    fn dim(&self) -> usize {
        self.dim
    }

    fn eval(&self, x: &[f64]) -> f64 {
        let mut result = 1.0;
        for i in 0..self.dim {
            result *= 1.0 / (self.c[i].powi(-2) + (x[i] - self.w[i]).powi(2));
        }
        result
    }
}
