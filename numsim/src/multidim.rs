//! Midpoint integration in two, three and N dimensions.
//!
//! Two strategies are provided for the 2D and 3D cases:
//!
//! * a direct grid, which loops over every cell of the Cartesian midpoint
//!   grid;
//! * an iterated integral, which nests calls to the 1D
//!   [`midpoint`](crate::quadrature::midpoint) rule, with the outer
//!   coordinates passed down explicitly.
//!
//! Both are exact (up to rounding) for integrands that are linear in each
//! variable, and agree with each other to within floating-point tolerance for
//! smooth integrands.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;

use crate::grid::Grid;
use crate::integrand::Integrand;
use crate::quadrature::midpoint;

/// Double midpoint integral over `x × y` on an `nx × ny` grid.
///
/// The cell values are summed first and scaled by `hx * hy` once.
pub fn midpoint_double1<F>(f: F, x: (f64, f64), y: (f64, f64), nx: usize, ny: usize) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let gx = Grid::new(nx, x);
    let gy = Grid::new(ny, y);

    let mut sum = 0.0;
    for i in 0..nx {
        let xi = gx.midpoint(i);
        for j in 0..ny {
            sum += f(xi, gy.midpoint(j));
        }
    }
    sum * gx.width() * gy.width()
}

/// Double midpoint integral computed as `∫ (∫ f(x, y) dy) dx`.
pub fn midpoint_double2<F>(f: F, x: (f64, f64), y: (f64, f64), nx: usize, ny: usize) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    midpoint(|xi| integrate_y(&f, xi, y, ny), x.0, x.1, nx)
}

/// Triple midpoint integral computed as `∫ (∫ (∫ f dz) dy) dx`.
///
/// The z range is `z = (e, zmax)`.
#[allow(clippy::too_many_arguments)]
pub fn midpoint_triple1<F>(
    f: F,
    x: (f64, f64),
    y: (f64, f64),
    z: (f64, f64),
    nx: usize,
    ny: usize,
    nz: usize,
) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    midpoint(|xi| integrate_yz(&f, xi, y, z, ny, nz), x.0, x.1, nx)
}

/// Triple midpoint integral on an `nx × ny × nz` grid.
///
/// Each cell contributes `hx * hy * hz * f(x_i, y_j, z_k)` as it is visited.
/// The volume weight is applied per cell rather than once at the end.
#[allow(clippy::too_many_arguments)]
pub fn midpoint_triple2<F>(
    f: F,
    x: (f64, f64),
    y: (f64, f64),
    z: (f64, f64),
    nx: usize,
    ny: usize,
    nz: usize,
) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    let gx = Grid::new(nx, x);
    let gy = Grid::new(ny, y);
    let gz = Grid::new(nz, z);
    let volume = gx.width() * gy.width() * gz.width();
    if nx == 0 || ny == 0 || nz == 0 {
        // An empty grid has an infinite or NaN bin width, as in the 1D rule.
        return volume * 0.0;
    }

    let mut sum = 0.0;
    for i in 0..nx {
        let xi = gx.midpoint(i);
        for j in 0..ny {
            let yj = gy.midpoint(j);
            for k in 0..nz {
                sum += volume * f(xi, yj, gz.midpoint(k));
            }
        }
    }
    sum
}

/// `∫ f(x, y) dy` at a fixed `x`.
fn integrate_y<F>(f: &F, x: f64, (c, d): (f64, f64), ny: usize) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    midpoint(|y| f(x, y), c, d, ny)
}

/// `∫∫ f(x, y, z) dz dy` at a fixed `x`.
fn integrate_yz<F>(f: &F, x: f64, (c, d): (f64, f64), z: (f64, f64), ny: usize, nz: usize) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    midpoint(|y| integrate_z(f, x, y, z, nz), c, d, ny)
}

/// `∫ f(x, y, z) dz` at fixed `x` and `y`.
fn integrate_z<F>(f: &F, x: f64, y: f64, (e, zmax): (f64, f64), nz: usize) -> f64
where
    F: Fn(f64, f64, f64) -> f64,
{
    midpoint(|z| f(x, y, z), e, zmax, nz)
}

/// The two ways of building a multi-dimensional midpoint integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Direct loop over the Cartesian grid (`midpoint_double1`, `midpoint_triple2`).
    Grid,
    /// Nested 1D integrations (`midpoint_double2`, `midpoint_triple1`).
    Iterated,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Grid, Strategy::Iterated];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Grid => "grid",
            Strategy::Iterated => "iterated",
        }
    }

    pub fn double<F>(&self, f: F, x: (f64, f64), y: (f64, f64), nx: usize, ny: usize) -> f64
    where
        F: Fn(f64, f64) -> f64,
    {
        match self {
            Strategy::Grid => midpoint_double1(f, x, y, nx, ny),
            Strategy::Iterated => midpoint_double2(f, x, y, nx, ny),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn triple<F>(
        &self,
        f: F,
        x: (f64, f64),
        y: (f64, f64),
        z: (f64, f64),
        nx: usize,
        ny: usize,
        nz: usize,
    ) -> f64
    where
        F: Fn(f64, f64, f64) -> f64,
    {
        match self {
            Strategy::Grid => midpoint_triple2(f, x, y, z, nx, ny, nz),
            Strategy::Iterated => midpoint_triple1(f, x, y, z, nx, ny, nz),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(Strategy::Grid),
            "iterated" => Ok(Strategy::Iterated),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

/// The product midpoint rule over an N-dimensional box.
pub struct ProductMidpoint {
    /// The number of dimensions.
    dim: usize,
    /// One uniform grid per dimension.
    grids: Vec<Grid>,
    /// The product of the bin widths, multiplied in dimension order.
    volume: f64,
    /// The total number of cells.
    n_cells: usize,
}

impl ProductMidpoint {
    /// Creates a new product midpoint rule.
    ///
    /// # Arguments
    ///
    /// * `divisions`: The number of subintervals in each dimension.
    /// * `boundaries`: A slice of `(min, max)` tuples defining the integration domain for
    ///   each dimension.
    pub fn new(divisions: &[usize], boundaries: &[(f64, f64)]) -> Self {
        let dim = boundaries.len();
        assert!(dim > 0, "Number of dimensions must be positive.");
        assert_eq!(
            divisions.len(),
            dim,
            "One division count is required per dimension."
        );

        let grids: Vec<Grid> = divisions
            .iter()
            .zip(boundaries)
            .map(|(&n, &bounds)| Grid::new(n, bounds))
            .collect();
        let volume = grids.iter().map(Grid::width).product();
        let n_cells = divisions.iter().product();

        ProductMidpoint {
            dim,
            grids,
            volume,
            n_cells,
        }
    }

    /// Returns the number of dimensions of the rule.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the number of grid cells, i.e. the number of integrand evaluations.
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// Integrates the given function.
    ///
    /// The cells are evaluated in parallel and their weighted values summed
    /// in lexicographic order, with the last dimension varying fastest.
    ///
    /// # Examples
    ///
    /// ```
    /// use numsim::multidim::ProductMidpoint;
    /// use numsim::integrand::Integrand;
    ///
    /// struct Plane;
    ///
    /// impl Integrand for Plane {
    ///     fn dim(&self) -> usize {
    ///         2
    ///     }
    ///
    ///     fn eval(&self, x: &[f64]) -> f64 {
    ///         2.0 * x[0] + x[1]
    ///     }
    /// }
    ///
    /// let rule = ProductMidpoint::new(&[4, 4], &[(0.0, 2.0), (2.0, 3.0)]);
    /// assert!((rule.integrate(&Plane) - 9.0).abs() < 1e-12);
    /// ```
    pub fn integrate<F: Integrand + Sync>(&self, integrand: &F) -> f64 {
        assert_eq!(
            integrand.dim(),
            self.dim,
            "Integrand dimension does not match rule dimension."
        );
        log::debug!(
            "product midpoint: {} cells over {} dimensions",
            self.n_cells,
            self.dim
        );
        if self.n_cells == 0 {
            return self.volume * 0.0;
        }

        let values: Vec<f64> = (0..self.n_cells)
            .into_par_iter()
            .map_init(
                || vec![0.0; self.dim],
                |point, cell| {
                    self.cell_centre(cell, point);
                    integrand.eval(&point[..])
                },
            )
            .collect();

        values.iter().fold(0.0, |acc, v| acc + self.volume * v)
    }

    /// Writes the centre of the `cell`-th cell (lexicographic order) into `point`.
    fn cell_centre(&self, mut cell: usize, point: &mut [f64]) {
        for d in (0..self.dim).rev() {
            let n = self.grids[d].n_bins();
            point[d] = self.grids[d].midpoint(cell % n);
            cell /= n;
        }
    }
}
