#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use sudoku_dlx::sudoku::grid::{Grid, GridError};
use sudoku_dlx::sudoku::solver::{self, SolveOutcome};
use sudoku_dlx::sudoku::suite;

/// Defines the command-line interface for the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_dlx", version, about = "A Dancing Links Sudoku solver")]
pub(crate) struct Cli {
    /// An optional puzzle-file argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(value_name = "PUZZLE")]
    pub puzzle: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `text`, `file`, `suite`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle provided as plain text.
    Text {
        /// The serialized puzzle (e.g. "53.2..4..."); `.` marks an empty
        /// cell, values above 9 use `A`, `B`, ... The grid size is inferred
        /// from the string length.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file. All whitespace in the file is ignored;
        /// the remaining characters are read as one serialized grid.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file beneath a directory.
    Dir {
        /// Path to the directory to scan recursively.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run the built-in acceptance battery and report per-case results.
    Suite,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable verification of a found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of timing statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the solved grid as a serialized string.
    #[arg(short, long, default_value_t = true)]
    pub(crate) print_solution: bool,
}

/// Parses a serialized puzzle, inferring the grid size from its length.
fn parse_text(text: &str) -> Result<Grid, GridError> {
    let size = Grid::infer_size(text.len())?;
    Grid::parse(text, size)
}

/// Solves one parsed puzzle and reports the outcome.
pub(crate) fn solve_grid(puzzle: &Grid, common: &CommonOptions) {
    let (outcome, elapsed) = solver::solve_timed(puzzle);
    let millis = elapsed.as_secs_f64() * 1000.0;

    match outcome {
        SolveOutcome::Solved(solved) => {
            if common.stats {
                println!("Solved in {millis:.3} milliseconds!");
            }
            if common.verify {
                let ok = solved.is_solved() && solved.preserves_givens(puzzle);
                println!("Verified: {ok}");
                assert!(ok, "solution failed verification");
            }
            if common.print_solution {
                println!("Solution: {solved}");
            }
        }
        SolveOutcome::Unsolvable => println!("No solution!"),
    }
}

/// Solves a puzzle given as text on the command line.
///
/// # Errors
///
/// If the text is not a serialized grid of a supported size.
pub(crate) fn solve_text(text: &str, common: &CommonOptions) -> Result<(), String> {
    let puzzle = parse_text(text).map_err(|error| error.to_string())?;
    solve_grid(&puzzle, common);
    Ok(())
}

/// Solves a puzzle file.
///
/// # Errors
///
/// If the file cannot be read or does not hold a serialized grid.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|error| format!("Unable to read {}: {error}", path.display()))?;
    let compact: String = content.split_whitespace().collect();

    println!("Solving: {}", path.display());
    solve_text(&compact, common)
}

/// Solves every `.sudoku` file beneath a directory.
///
/// # Errors
///
/// If the path is not a directory, or any contained puzzle fails to parse.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!(
            "Provided path is not a directory: {}",
            path.display()
        ));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            continue;
        }
        solve_file(file_path, common)?;
        println!();
    }

    Ok(())
}

/// Helper to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Runs the built-in acceptance battery and prints a per-case report plus
/// the aggregate average, mirroring the interactive solve output.
pub(crate) fn run_suite() -> Result<(), String> {
    println!("Running 9x9 cases:");
    let mut report = suite::run(suite::NINE_BY_NINE);
    print_case_lines(&report);

    println!("Running 16x16 cases:");
    let sixteen = suite::run(suite::SIXTEEN_BY_SIXTEEN);
    print_case_lines(&sixteen);
    report.outcomes.extend(sixteen.outcomes);

    println!("\n========================[ Suite Statistics ]=========================");
    stat_line("Cases", report.outcomes.len());
    stat_line(
        "Failures",
        report
            .outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .count(),
    );
    stat_line("Average time (ms)", format!("{:.3}", report.average_ms()));
    println!("=====================================================================");

    if report.all_passed() {
        println!("\nAll cases PASSED!");
        Ok(())
    } else {
        Err("Some cases FAILED or gave WRONG results!".to_owned())
    }
}

fn print_case_lines(report: &suite::SuiteReport) {
    for outcome in &report.outcomes {
        let millis = outcome.elapsed.as_secs_f64() * 1000.0;
        if outcome.passed {
            println!("- Passed: {} (in {millis:.3} milliseconds)", outcome.title);
        } else {
            eprintln!("X Failed: {} (in {millis:.3} milliseconds)", outcome.title);
            if let Some(detail) = &outcome.detail {
                eprintln!("  -> {detail}");
            }
        }
    }
}

/// Prints a completion script for the given shell to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}
