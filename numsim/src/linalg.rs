//! Dense Gaussian elimination without pivoting.

use ndarray::{s, Array1, Array2};

use crate::error::SolveError;

/// Solves `Ax = b` in place by Gaussian elimination and back-substitution.
///
/// This is a destructive operation. On success `b` holds the solution `x`
/// and the upper triangle of `a` holds the eliminated system. The entries
/// below the diagonal are left as they were and are never read again.
///
/// No pivoting is performed. If a diagonal entry that must be divided by is
/// exactly zero, [`SolveError::ZeroPivot`] is returned. At that point `a` and
/// `b` may already be partially modified.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use numsim::linalg::gauss_elim;
///
/// let mut a = array![[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
/// let mut b = array![11.0, -16.0, 17.0];
/// gauss_elim(&mut a, &mut b).unwrap();
/// assert!((b[0] - 1.0).abs() < 1e-12);
/// assert!((b[1] + 2.0).abs() < 1e-12);
/// assert!((b[2] - 3.0).abs() < 1e-12);
/// ```
pub fn gauss_elim(a: &mut Array2<f64>, b: &mut Array1<f64>) -> Result<(), SolveError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(SolveError::NotSquare {
            rows: n,
            cols: a.ncols(),
        });
    }
    if b.len() != n {
        return Err(SolveError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    // Elimination phase
    for k in 0..n.saturating_sub(1) {
        for i in (k + 1)..n {
            if a[[i, k]] == 0.0 {
                continue;
            }
            let pivot = a[[k, k]];
            if pivot == 0.0 {
                return Err(SolveError::ZeroPivot { row: k });
            }
            let lambda = a[[i, k]] / pivot;
            let (pivot_row, mut row) = a.multi_slice_mut((s![k, k + 1..], s![i, k + 1..]));
            row.scaled_add(-lambda, &pivot_row);
            b[i] -= lambda * b[k];
        }
        log::trace!("eliminated column {} of {}", k, n);
    }

    // Back-substitution phase
    for k in (0..n).rev() {
        let pivot = a[[k, k]];
        if pivot == 0.0 {
            return Err(SolveError::ZeroPivot { row: k });
        }
        let dot = a.slice(s![k, k + 1..]).dot(&b.slice(s![k + 1..]));
        b[k] = (b[k] - dot) / pivot;
    }

    log::debug!("solved {}x{} system by Gaussian elimination", n, n);
    Ok(())
}

/// Solves `Ax = b` without modifying the inputs.
///
/// This is a convenience function that runs [`gauss_elim`] on copies.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, SolveError> {
    let mut a = a.clone();
    let mut x = b.clone();
    gauss_elim(&mut a, &mut x)?;
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn test_gauss_elim_reference_system() {
        let a0 = array![[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
        let b0 = array![11.0, -16.0, 17.0];

        let mut a = a0.clone();
        let mut b = b0.clone();
        gauss_elim(&mut a, &mut b).expect("elimination should succeed");

        // Verify: Ax = b against the untouched copies
        let ax = a0.dot(&b);
        for i in 0..3 {
            assert_relative_eq!(ax[i], b0[i], epsilon = 1e-10);
        }
        for (got, want) in b.iter().zip([1.0, -2.0, 3.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_elim_mutates_inputs() {
        let mut a = array![[2.0, 1.0], [4.0, 5.0]];
        let mut b = array![3.0, 9.0];
        gauss_elim(&mut a, &mut b).unwrap();

        // Row 1 became [4, 5 - 2*1] and the sub-diagonal entry was not touched.
        assert_eq!(a, array![[2.0, 1.0], [4.0, 3.0]]);
        assert_relative_eq!(b[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(b[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_solve_leaves_inputs_untouched() {
        let a = array![[3.0, 1.0], [1.0, 2.0]];
        let b = array![9.0, 8.0];
        let x = solve(&a, &b).unwrap();

        assert_eq!(a, array![[3.0, 1.0], [1.0, 2.0]]);
        assert_eq!(b, array![9.0, 8.0]);
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_random_diagonally_dominant_systems() {
        let mut rng = Pcg64::seed_from_u64(1234);
        for n in [1, 2, 5, 12, 30] {
            let mut a = Array2::from_shape_fn((n, n), |_| rng.gen_range(-1.0..1.0));
            for i in 0..n {
                a[[i, i]] += n as f64 + 1.0;
            }
            let b = Array1::from_shape_fn(n, |_| rng.gen_range(-10.0..10.0));

            let x = solve(&a, &b).expect("diagonally dominant systems have nonzero pivots");
            let residual = &a.dot(&x) - &b;
            for r in residual.iter() {
                assert!(r.abs() < 1e-10, "n={} residual={}", n, r);
            }
        }
    }

    #[test]
    fn test_zero_leading_pivot_fails() {
        let mut a = array![[0.0, 1.0], [1.0, 1.0]];
        let mut b = array![1.0, 2.0];
        assert_eq!(
            gauss_elim(&mut a, &mut b),
            Err(SolveError::ZeroPivot { row: 0 })
        );
    }

    #[test]
    fn test_zero_pivot_found_during_back_substitution() {
        // Column 0 needs no elimination, so the zero pivot is only hit when
        // dividing in the back-substitution phase.
        let mut a = array![[0.0, 1.0], [0.0, 1.0]];
        let mut b = array![1.0, 1.0];
        assert_eq!(
            gauss_elim(&mut a, &mut b),
            Err(SolveError::ZeroPivot { row: 0 })
        );
    }

    #[test]
    fn test_zero_pivot_without_row_exchange() {
        // Nonsingular, but the second pivot vanishes after the first step.
        let a = array![[1.0, 1.0, 1.0], [1.0, 1.0, 2.0], [1.0, 2.0, 3.0]];
        let b = array![6.0, 9.0, 14.0];
        assert_eq!(solve(&a, &b), Err(SolveError::ZeroPivot { row: 1 }));
    }

    #[test]
    fn test_shape_errors() {
        let mut a = Array2::<f64>::zeros((2, 3));
        let mut b = Array1::<f64>::zeros(2);
        assert_eq!(
            gauss_elim(&mut a, &mut b),
            Err(SolveError::NotSquare { rows: 2, cols: 3 })
        );

        let a = Array2::<f64>::eye(3);
        let b = Array1::<f64>::zeros(4);
        assert_eq!(
            solve(&a, &b),
            Err(SolveError::DimensionMismatch {
                expected: 3,
                got: 4
            })
        );
    }

    #[test]
    fn test_empty_system() {
        let mut a = Array2::<f64>::zeros((0, 0));
        let mut b = Array1::<f64>::zeros(0);
        assert_eq!(gauss_elim(&mut a, &mut b), Ok(()));
    }
}
