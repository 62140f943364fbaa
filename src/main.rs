//! # `sudoku-solver`
//!
//! A command-line Sudoku solver. Puzzles are given as 81-character digit
//! strings in row-major order, with '0' for a blank cell, either inline,
//! one per line in a file, or as a directory of such files.
//!
//! The engine is a constraint-propagation fixed point (naked singles,
//! hidden singles, box-line reduction) followed by a depth-first
//! backtracking search over whatever ambiguity propagation leaves behind.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle given inline
//! sudoku-solver text --input "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
//!
//! # Solve every puzzle line in a file
//! sudoku-solver file --path puzzles.txt
//!
//! # Treat a bare argument as a puzzle file
//! sudoku-solver puzzles.txt
//!
//! # Solve every file under a directory
//! sudoku-solver dir --path puzzles/
//!
//! # Generate shell completions
//! sudoku-solver completions --shell zsh
//! ```
//!
//! ## Common options
//!
//! -   `-d, --debug`: print the parsed grid and engine diagnostics.
//! -   `--verify`: re-check the solution against the Sudoku rules (default: `true`).
//! -   `--stats`: print propagation/search statistics (default: `false`).
//! -   `-p, --print-solution`: print the solved grid (default: `true`).

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sudoku_solver::sudoku::solver::{Solution, SolveStats, Solver};
use tikv_jemalloc_ctl::{epoch, stats};
use walkdir::WalkDir;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage figures in the statistics block.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A constraint-propagation Sudoku solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file, one puzzle per line.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `text`, `file`, `dir`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle given inline as an 81-character digit string.
    Text {
        /// The puzzle, row-major, '0' for a blank cell.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle line in a file. Blank lines and lines starting
    /// with '#' are skipped.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle file found under a directory.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// The shell to generate completions for.
        #[arg(short, long)]
        shell: Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output: the parsed grid plus engine diagnostics.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-check a found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print propagation and search statistics after solving.
    #[arg(short, long, default_value_t = false)]
    stats: bool,

    /// Print the solved grid.
    #[arg(short, long, default_value_t = true)]
    print_solution: bool,
}

/// Main entry point: parses the command line and dispatches.
fn main() {
    pretty_env_logger::init();

    let cli = Cli::parse();

    // A bare path without a subcommand is treated as a puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            solve_file(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::Text { input, common }) => solve_line(input.trim(), &common),
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Solves a single puzzle line and reports per the common options.
fn solve_line(line: &str, common: &CommonOptions) {
    let parse_start = std::time::Instant::now();
    let mut solver = match Solver::from_line(line) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("Error parsing puzzle: {e}");
            return;
        }
    };
    let parse_time = parse_start.elapsed();

    if common.debug {
        println!("Puzzle:\n{}", solver.grid());
    }

    epoch::advance().unwrap();

    let solve_start = std::time::Instant::now();
    let solution = solver.solve();
    let elapsed = solve_start.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(solution.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    match solution {
        Some(solution) if common.print_solution => println!("Solution:\n{solution}"),
        Some(_) => println!("Solved"),
        None => println!("No solution found"),
    }
}

/// Solves every puzzle line in a file.
fn solve_file(path: &Path, common: &CommonOptions) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            return;
        }
    };

    for line in puzzle_lines(&contents) {
        println!("Solving: {line}");
        solve_line(line, common);
    }
}

/// Solves every file found under a directory, in path order.
fn solve_dir(path: &Path, common: &CommonOptions) {
    let files: Vec<PathBuf> = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .collect();

    if files.is_empty() {
        eprintln!("No puzzle files found under {}", path.display());
        return;
    }

    for file in files {
        println!("Solving: {}", file.display());
        solve_file(&file, common);
    }
}

/// The puzzle lines of a file: blank lines and '#' comments are skipped.
fn puzzle_lines(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect_vec()
}

/// Re-checks a found solution against the Sudoku rules.
///
/// Prints whether the verification was successful. If verification fails,
/// it panics. If `solution` is `None`, it prints "No solution to verify".
fn verify_solution(solution: Option<&Solution>) {
    if let Some(solution) = solution {
        let ok = solution.verify();
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("No solution to verify");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and engine statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    solve_stats: &SolveStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let rules = solve_stats.propagation.totals();

    println!("\n======================[ Propagation Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.6}", parse_time.as_secs_f64()));
    stat_line("Rounds", solve_stats.propagation.rounds.len());
    stat_line("Candidates removed", solve_stats.propagation.removed());
    stat_line("  by elimination", rules.eliminated);
    stat_line("  by hidden singles", rules.hidden_singles);
    stat_line("  by box-line reduction", rules.box_line);
    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", solve_stats.search.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", solve_stats.search.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.6}"));
    println!("=====================================================================");
}
