//! barcodes: persistent homology barcodes of simplicial filtrations
//!
//! Usage: barcodes <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use persistence_barcodes::commands::{
    BoundaryCommand, GenerateCommand, GenerateConfig, PersistenceCommand,
};
use persistence_barcodes::filtration::FiltrationError;
use persistence_barcodes::output::OutputFormat;

#[derive(Parser)]
#[command(name = "barcodes")]
#[command(version)]
#[command(about = "Persistent homology barcodes from simplicial filtrations", long_about = None)]
struct Cli {
    /// Number of threads for sorting large inputs (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Reject malformed lines instead of skipping them, and require exactly
    /// dimension + 1 distinct vertices per simplex.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the persistence barcode of a filtration
    Barcode {
        /// Input filtration file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format: text or tsv
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Leave zero-persistence bars out of the report
        #[arg(long)]
        skip_zero: bool,

        /// Print stage timings and statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Print the boundary matrix of a filtration, one column per line
    Boundary {
        /// Input filtration file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the reduced matrix instead
        #[arg(short, long)]
        reduced: bool,

        /// Print matrix statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a random Vietoris-Rips filtration for benchmarking
    Generate {
        /// Output file
        #[arg(short, long, default_value = "filtration.txt")]
        output: PathBuf,

        /// Number of random points in the unit square
        #[arg(short = 'n', long, default_value = "100")]
        points: usize,

        /// Largest simplex dimension to emit (0, 1 or 2)
        #[arg(short = 'd', long, default_value = "2")]
        max_dim: usize,

        /// Longest edge to include
        #[arg(short, long, default_value = "0.25")]
        radius: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Must be set before any parsing occurs
    if cli.strict {
        persistence_barcodes::config::set_strict_parsing(true);
    }

    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Barcode {
            input,
            format,
            skip_zero,
            stats,
        } => run_barcode(input, format, skip_zero, stats),

        Commands::Boundary {
            input,
            reduced,
            stats,
        } => run_boundary(input, reduced, stats),

        Commands::Generate {
            output,
            points,
            max_dim,
            radius,
            seed,
            force,
        } => run_generate(output, points, max_dim, radius, seed, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// True when the input should come from stdin.
fn is_stdin(input: &Option<PathBuf>) -> bool {
    match input {
        Some(path) => path.to_string_lossy() == "-",
        None => true,
    }
}

fn run_barcode(
    input: Option<PathBuf>,
    format: String,
    skip_zero: bool,
    stats: bool,
) -> Result<(), FiltrationError> {
    let format = OutputFormat::parse(&format).ok_or_else(|| {
        FiltrationError::InvalidFormat(format!(
            "Unknown output format '{}' (expected text or tsv)",
            format
        ))
    })?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let cmd = PersistenceCommand::new()
        .with_format(format)
        .with_skip_zero(skip_zero);

    let result = match input {
        Some(ref path) if !is_stdin(&input) => cmd.run(path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if stats {
        eprintln!("Barcode stats: {}", result);
    }

    Ok(())
}

fn run_boundary(
    input: Option<PathBuf>,
    reduced: bool,
    stats: bool,
) -> Result<(), FiltrationError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let cmd = BoundaryCommand::new().with_reduced(reduced);

    let result = match input {
        Some(ref path) if !is_stdin(&input) => cmd.run(path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if stats {
        eprintln!("Boundary stats: {}", result);
    }

    Ok(())
}

fn run_generate(
    output: PathBuf,
    points: usize,
    max_dim: usize,
    radius: f64,
    seed: u64,
    force: bool,
) -> Result<(), FiltrationError> {
    let config = GenerateConfig {
        output,
        points,
        max_dimension: max_dim,
        radius,
        seed,
        force,
    };

    eprintln!("Output: {}", config.output.display());
    let stats = GenerateCommand::new(config).run()?;
    eprintln!("Generated {}", stats);

    Ok(())
}
