//! symnmf - SymNMF clustering CLI
//!
//! Usage:
//!   symnmf sym points.txt                # Similarity matrix A
//!   symnmf ddg points.txt                # Diagonal degree matrix D
//!   symnmf norm points.txt               # Normalized similarity matrix W
//!   symnmf symnmf points.txt -k 3        # Final factor matrix H
//!   symnmf analysis points.txt -k 3      # SymNMF vs K-Means silhouette scores

use clap::{Parser, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use symnmf::affinity::{ddg, normalized_similarity, sym};
use symnmf::analysis::analyze;
use symnmf::cluster::{factorize, initialize_h, FactorizationParams, DEFAULT_SEED};
use symnmf::loader::load_points;
use symnmf::output::{format_analysis, format_matrix};
use symnmf::{Matrix, SymnmfError};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Single diagnostic line printed for any failure.
const FAILURE_MESSAGE: &str = "An Error Has Occurred";

/// symnmf - Soft clustering with Symmetric Non-negative Matrix Factorization
#[derive(Parser)]
#[command(name = "symnmf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// What to compute
    #[arg(value_enum)]
    goal: Goal,

    /// Comma-separated point file, one point per line
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Number of clusters (required for symnmf and analysis)
    #[arg(short = 'k', long = "clusters")]
    k: Option<usize>,

    /// Seed for the initial factor matrix
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `-k` is only read by `symnmf` and `analysis`; the matrix goals ignore it
/// rather than checking it against the point count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Goal {
    /// Similarity matrix A
    Sym,
    /// Diagonal degree matrix D
    Ddg,
    /// Normalized similarity matrix W
    Norm,
    /// Factor matrix H
    Symnmf,
    /// Silhouette scores of SymNMF and K-Means
    Analysis,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                e.exit()
            }
            _ => {
                println!("{FAILURE_MESSAGE}");
                return ExitCode::FAILURE;
            }
        },
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, goal = ?cli.goal, "symnmf failed");
            println!("{FAILURE_MESSAGE}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: logging already initialized");
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let x = load_points(&cli.file)?;

    match cli.goal {
        Goal::Sym => emit_matrix(&sym(&x)?, cli.json),
        Goal::Ddg => emit_matrix(&ddg(&sym(&x)?)?, cli.json),
        Goal::Norm => emit_matrix(&normalized_similarity(&x)?, cli.json),
        Goal::Symnmf => {
            let k = require_k(cli.k, 1, x.n_rows())?;
            let w = normalized_similarity(&x)?;
            let h_init = initialize_h(&w, k, cli.seed)?;
            let result = factorize(&w, &h_init, &FactorizationParams::default())?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&result)? + "\n")
            } else {
                Ok(format_matrix(&result.h))
            }
        }
        Goal::Analysis => {
            let k = require_k(cli.k, 2, x.n_rows())?;
            let report = analyze(&x, k, cli.seed)?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&report)? + "\n")
            } else {
                Ok(format_analysis(&report))
            }
        }
    }
}

/// Checks that `k` was given and lies in `min..n`.
fn require_k(k: Option<usize>, min: usize, n: usize) -> Result<usize, SymnmfError> {
    match k {
        Some(k) if k >= min && k < n => Ok(k),
        Some(k) => Err(SymnmfError::invalid_k(k, format!("{min} <= k < {n}"))),
        None => Err(SymnmfError::InvalidHyperparameter {
            param: "k".to_string(),
            value: "<missing>".to_string(),
            constraint: format!("{min} <= k < {n}"),
        }),
    }
}

fn emit_matrix(m: &Matrix<f64>, json: bool) -> Result<String, Box<dyn Error>> {
    if json {
        Ok(serde_json::to_string_pretty(&m.to_rows())? + "\n")
    } else {
        Ok(format_matrix(m))
    }
}
