//! The `Integrand` trait, which defines an N-dimensional function to be integrated.
//!
//! The one-, two- and three-dimensional rules accept plain closures. The
//! trait is only needed by [`ProductMidpoint`](crate::multidim::ProductMidpoint),
//! where the number of dimensions is not known at compile time.

/// A trait representing a function to be integrated over a box.
///
/// Implementations are expected to be pure: the rules may evaluate them any
/// number of times, in any order, and from several threads.
pub trait Integrand {
    /// Returns the number of dimensions of the integration space.
    fn dim(&self) -> usize;

    /// Evaluates the function at a given point `x`.
    ///
    /// # Arguments
    ///
    /// * `x`: A slice of `f64` of length [`dim`](Integrand::dim) holding the
    ///   point in the integration space.
    fn eval(&self, x: &[f64]) -> f64;
}

/// Adapts a closure over a coordinate slice into an [`Integrand`].
#[derive(Debug, Clone, Copy)]
pub struct FnIntegrand<F> {
    dim: usize,
    func: F,
}

impl<F> FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    pub fn new(dim: usize, func: F) -> Self {
        assert!(dim > 0, "Number of dimensions must be positive.");
        FnIntegrand { dim, func }
    }
}

impl<F> Integrand for FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (self.func)(x)
    }
}

impl<T: Integrand + ?Sized> Integrand for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (**self).eval(x)
    }
}
