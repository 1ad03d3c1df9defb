//! Empirical convergence studies.
//!
//! A convergence test evaluates a rule at a starting discretization and then
//! repeatedly multiplies every division count by a fixed rate. Each
//! observation is reported as it is made and nothing is kept. For the
//! second-order rules in this crate, doubling the divisions should shrink the
//! error roughly four-fold.

use std::fmt;

use serde::Serialize;

/// One observation of a convergence test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// The number of subintervals in each dimension.
    pub divisions: Vec<usize>,
    /// The value computed by the rule at this discretization.
    pub value: f64,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in &self.divisions {
            write!(f, " {}", n)?;
        }
        write!(f, " {}", self.value)
    }
}

/// The configuration of a convergence test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvergenceTest {
    /// The number of discretizations to evaluate.
    pub iterations: usize,
    /// The factor applied to every division count between rounds.
    pub rate: usize,
}

impl Default for ConvergenceTest {
    fn default() -> Self {
        ConvergenceTest {
            iterations: 10,
            rate: 2,
        }
    }
}

impl ConvergenceTest {
    /// Creates a test of `iterations` rounds with the default rate of 2.
    pub fn new(iterations: usize) -> Self {
        ConvergenceTest {
            iterations,
            ..Default::default()
        }
    }

    pub fn with_rate(mut self, rate: usize) -> Self {
        self.rate = rate;
        self
    }

    /// Runs the test.
    ///
    /// # Arguments
    ///
    /// * `start`: The division count of each dimension in the first round.
    /// * `method`: Computes the rule's value for the given division counts.
    /// * `report`: Receives each observation as soon as it is made.
    pub fn run<M, R>(&self, start: &[usize], mut method: M, mut report: R)
    where
        M: FnMut(&[usize]) -> f64,
        R: FnMut(Sample),
    {
        let mut divisions = start.to_vec();
        for round in 0..self.iterations {
            let value = method(&divisions);
            log::debug!(
                "convergence round {}/{}: divisions={:?} value={:e}",
                round + 1,
                self.iterations,
                divisions,
                value
            );
            report(Sample {
                divisions: divisions.clone(),
                value,
            });
            if round + 1 == self.iterations {
                break;
            }
            for n in &mut divisions {
                *n *= self.rate;
            }
        }
    }
}

/// Prints a convergence table for a one-dimensional rule.
///
/// Each line holds the subinterval count and the rule's value.
///
/// # Examples
///
/// ```
/// use numsim::convergence::{convergence_test, ConvergenceTest};
/// use numsim::quadrature::midpoint;
///
/// let square = |t: f64| t * t;
/// let config = ConvergenceTest::new(3);
/// convergence_test(|f, a, b, n| midpoint(f, a, b, n), square, (0.0, 1.0), 4, &config);
/// ```
pub fn convergence_test<M, F>(
    method: M,
    f: F,
    (a, b): (f64, f64),
    n: usize,
    config: &ConvergenceTest,
) where
    M: Fn(&F, f64, f64, usize) -> f64,
{
    config.run(&[n], |d| method(&f, a, b, d[0]), |sample| println!("{}", sample));
}

/// Prints a convergence table for a two-dimensional rule.
///
/// Both `nx` and `ny` grow by the configured rate each round.
pub fn convergence_test_double<M, F>(
    method: M,
    f: F,
    x: (f64, f64),
    y: (f64, f64),
    nx: usize,
    ny: usize,
    config: &ConvergenceTest,
) where
    M: Fn(&F, (f64, f64), (f64, f64), usize, usize) -> f64,
{
    config.run(
        &[nx, ny],
        |d| method(&f, x, y, d[0], d[1]),
        |sample| println!("{}", sample),
    );
}

/// Prints a convergence table for a three-dimensional rule.
#[allow(clippy::too_many_arguments)]
pub fn convergence_test_triple<M, F>(
    method: M,
    f: F,
    x: (f64, f64),
    y: (f64, f64),
    z: (f64, f64),
    (nx, ny, nz): (usize, usize, usize),
    config: &ConvergenceTest,
) where
    M: Fn(&F, (f64, f64), (f64, f64), (f64, f64), usize, usize, usize) -> f64,
{
    config.run(
        &[nx, ny, nz],
        |d| method(&f, x, y, z, d[0], d[1], d[2]),
        |sample| println!("{}", sample),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multidim::{midpoint_double1, midpoint_triple2};
    use crate::quadrature::{midpoint, trapezoidal};
    use std::f64::consts::E;

    fn cubic_exp(t: f64) -> f64 {
        3.0 * t.powi(2) * t.powi(3).exp()
    }

    fn collect(
        config: &ConvergenceTest,
        start: &[usize],
        method: impl FnMut(&[usize]) -> f64,
    ) -> Vec<Sample> {
        let mut samples = Vec::new();
        config.run(start, method, |s| samples.push(s));
        samples
    }

    #[test]
    fn test_default_config() {
        let config = ConvergenceTest::default();
        assert_eq!(config.iterations, 10);
        assert_eq!(config.rate, 2);
        assert_eq!(ConvergenceTest::new(4).rate, 2);
        assert_eq!(ConvergenceTest::new(4).with_rate(3).rate, 3);
    }

    #[test]
    fn test_divisions_grow_geometrically() {
        let config = ConvergenceTest::new(4).with_rate(3);
        let samples = collect(&config, &[2, 5], |d| (d[0] + d[1]) as f64);
        let divisions: Vec<Vec<usize>> = samples.iter().map(|s| s.divisions.clone()).collect();
        assert_eq!(
            divisions,
            vec![vec![2, 5], vec![6, 15], vec![18, 45], vec![54, 135]]
        );
        assert_eq!(samples[3].value, 189.0);
    }

    #[test]
    fn test_last_round_does_not_grow_divisions() {
        let start = usize::MAX / 2 + 1;
        let samples = collect(&ConvergenceTest::new(1), &[start], |d| d[0] as f64);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].divisions, vec![start]);

        let samples = collect(&ConvergenceTest::new(2), &[start / 2], |_| 0.0);
        assert_eq!(samples[1].divisions, vec![start]);
    }

    #[test]
    fn test_zero_iterations_reports_nothing() {
        let mut calls = 0;
        let samples = collect(&ConvergenceTest::new(0), &[4], |_| {
            calls += 1;
            0.0
        });
        assert!(samples.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_sample_display_matches_report_lines() {
        let one = Sample {
            divisions: vec![4],
            value: 1.5,
        };
        assert_eq!(one.to_string(), " 4 1.5");
        let two = Sample {
            divisions: vec![5, 10],
            value: 9.0,
        };
        assert_eq!(two.to_string(), " 5 10 9");
    }

    #[test]
    fn test_sample_serializes() {
        let sample = Sample {
            divisions: vec![8, 8],
            value: 0.25,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"divisions":[8,8],"value":0.25}"#);
    }

    #[test]
    fn test_second_order_convergence() {
        let exact = E - 1.0;
        let config = ConvergenceTest::new(7);
        for rule in [midpoint::<fn(f64) -> f64>, trapezoidal::<fn(f64) -> f64>] {
            let samples = collect(&config, &[4], |d| rule(cubic_exp, 0.0, 1.0, d[0]));
            let errors: Vec<f64> = samples.iter().map(|s| (s.value - exact).abs()).collect();
            for pair in errors.windows(2) {
                let ratio = pair[0] / pair[1];
                assert!(
                    (3.5..4.5).contains(&ratio),
                    "error ratio {} outside second-order band: {:?}",
                    ratio,
                    errors
                );
            }
        }
    }

    #[test]
    fn test_drivers_run_every_rule_shape() {
        let config = ConvergenceTest::new(2);
        convergence_test(|f, a, b, n| trapezoidal(f, a, b, n), cubic_exp, (0.0, 1.0), 4, &config);
        convergence_test_double(
            |f, x, y, nx, ny| midpoint_double1(f, x, y, nx, ny),
            |x: f64, y: f64| 2.0 * x + y,
            (0.0, 2.0),
            (2.0, 3.0),
            5,
            5,
            &config,
        );
        convergence_test_triple(
            |f, x, y, z, nx, ny, nz| midpoint_triple2(f, x, y, z, nx, ny, nz),
            |x: f64, y: f64, z: f64| x * y * z,
            (0.0, 1.0),
            (0.0, 1.0),
            (0.0, 1.0),
            (2, 2, 2),
            &config,
        );
    }
}
