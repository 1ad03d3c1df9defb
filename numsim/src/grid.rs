//! The uniform grid shared by all composite rules.

/// A uniform partition of a single interval `[min, max]` into `n_bins`
/// subintervals of equal width.
///
/// Every rule in this crate takes its sample coordinates from here, so the
/// scalar, batch and SIMD forms of a rule see exactly the same points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// The number of bins in the grid.
    n_bins: usize,
    /// The lower boundary of the interval.
    min: f64,
    /// The width of each bin, `(max - min) / n_bins`.
    width: f64,
}

impl Grid {
    /// Creates a uniform grid of `n_bins` bins over `(min, max)`.
    ///
    /// No validation is performed: `n_bins == 0` gives an infinite width and
    /// `min == max` a zero width, following IEEE-754 arithmetic.
    pub fn new(n_bins: usize, (min, max): (f64, f64)) -> Self {
        Grid {
            n_bins,
            min,
            width: (max - min) / n_bins as f64,
        }
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Returns the common bin width `h`.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the `i`-th bin boundary, `min + i*h`.
    pub fn node(&self, i: usize) -> f64 {
        self.min + i as f64 * self.width
    }

    /// Returns the centre of the `i`-th bin, `min + h/2 + i*h`.
    pub fn midpoint(&self, i: usize) -> f64 {
        self.min + self.width / 2.0 + i as f64 * self.width
    }

    /// Iterates over the interior boundaries `node(1), ..., node(n_bins - 1)`.
    pub fn interior_nodes(&self) -> impl Iterator<Item = f64> + '_ {
        (1..self.n_bins).map(move |i| self.node(i))
    }

    /// Iterates over the bin centres in increasing order.
    pub fn midpoints(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n_bins).map(move |i| self.midpoint(i))
    }
}
