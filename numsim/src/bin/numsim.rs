use std::fs::File;
use std::io::Write;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ndarray::array;
use serde::Serialize;

use numsim::benchmark::integrands::{Affine, CubicExp};
use numsim::convergence::{ConvergenceTest, Sample};
use numsim::integrand::Integrand;
use numsim::linalg::gauss_elim;
use numsim::multidim::Strategy;
use numsim::quadrature::Rule;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Approximate the integral of 3t²exp(t³) over [0, 1]
    Integrate {
        /// Quadrature rule
        #[clap(short, long, value_parser, default_value = "trapezoidal")]
        rule: Rule,
        /// Number of subintervals
        #[clap(short, long, value_parser, default_value_t = 4)]
        n: usize,
    },
    /// Print convergence tables
    Convergence {
        /// Restrict the 1D tables to one rule
        #[clap(short, long, value_parser)]
        rule: Option<Rule>,
        /// Restrict the 2D tables to one strategy
        #[clap(short, long, value_parser)]
        strategy: Option<Strategy>,
        /// Starting number of subintervals for the 1D tables
        #[clap(short, long, value_parser, default_value_t = 4)]
        n: usize,
        /// Starting number of subintervals per dimension for the 2D tables
        #[clap(long, value_parser, default_value_t = 5)]
        n2d: usize,
        /// Number of rows per table
        #[clap(short, long, value_parser, default_value_t = 10)]
        iterations: usize,
        /// Growth factor between rows
        #[clap(long, value_parser, default_value_t = 2)]
        rate: usize,
        /// Also write every sample to this JSON file
        #[clap(short, long, value_parser)]
        output: Option<String>,
    },
    /// Solve the 3x3 demonstration system by Gaussian elimination
    Solve,
}

#[derive(Debug, Serialize)]
struct ConvergenceTable {
    method: String,
    integrand: String,
    analytical_result: f64,
    samples: Vec<Sample>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command.unwrap_or(Command::Integrate {
        rule: Rule::Trapezoidal,
        n: 4,
    }) {
        Command::Integrate { rule, n } => {
            let (a, b) = CubicExp.domain();
            println!("{}", rule.integrate(CubicExp::value, a, b, n));
        }
        Command::Convergence {
            rule,
            strategy,
            n,
            n2d,
            iterations,
            rate,
            output,
        } => {
            let config = ConvergenceTest::new(iterations).with_rate(rate);
            let tables = run_convergence(&config, rule, strategy, n, n2d);
            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&tables)?;
                let mut file =
                    File::create(&path).with_context(|| format!("creating {}", path))?;
                file.write_all(json.as_bytes())?;
                println!("Convergence results written to {}", path);
            }
        }
        Command::Solve => {
            let mut a = array![[4.0, -2.0, 1.0], [-2.0, 4.0, -2.0], [1.0, -2.0, 4.0]];
            let mut b = array![11.0, -16.0, 17.0];
            gauss_elim(&mut a, &mut b)?;
            println!("{}", b);
        }
    }

    Ok(())
}

fn run_convergence(
    config: &ConvergenceTest,
    rule: Option<Rule>,
    strategy: Option<Strategy>,
    n: usize,
    n2d: usize,
) -> Vec<ConvergenceTable> {
    let mut tables = Vec::new();
    let run_all = rule.is_none() && strategy.is_none();

    let rules: Vec<Rule> = match rule {
        Some(rule) => vec![rule],
        None if run_all => Rule::ALL.to_vec(),
        None => Vec::new(),
    };
    let cubic = CubicExp;
    let (a, b) = cubic.domain();
    for rule in rules {
        println!("{}", rule.name().to_uppercase());
        let mut samples = Vec::new();
        config.run(
            &[n],
            |d| rule.integrate(CubicExp::value, a, b, d[0]),
            |sample| {
                println!("{}", sample);
                samples.push(sample);
            },
        );
        println!("\n");
        tables.push(ConvergenceTable {
            method: rule.name().to_string(),
            integrand: "3t^2 exp(t^3)".to_string(),
            analytical_result: cubic.analytical_result(),
            samples,
        });
    }

    let strategies: Vec<Strategy> = match strategy {
        Some(strategy) => vec![strategy],
        None if run_all => Strategy::ALL.to_vec(),
        None => Vec::new(),
    };
    let plane = Affine::plane();
    let (x_range, y_range) = (plane.boundaries()[0], plane.boundaries()[1]);
    for strategy in strategies {
        println!("MIDPOINT_DOUBLE ({})", strategy.name().to_uppercase());
        let mut samples = Vec::new();
        config.run(
            &[n2d, n2d],
            |d| strategy.double(|x, y| plane.eval(&[x, y]), x_range, y_range, d[0], d[1]),
            |sample| {
                println!("{}", sample);
                samples.push(sample);
            },
        );
        println!("\n");
        tables.push(ConvergenceTable {
            method: format!("midpoint_double_{}", strategy.name()),
            integrand: "2x + y".to_string(),
            analytical_result: plane.analytical_result(),
            samples,
        });
    }

    tables
}
