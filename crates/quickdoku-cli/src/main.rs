//! Console front end: solve puzzles given on the command line or read from
//! a line-oriented puzzle list file.

use clap::Parser;
use quickdoku_core::{Board, CancelToken, Cancelled, SolveReport, Solver};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "quickdoku", about = "Solve 9x9 Sudoku puzzles")]
struct Args {
    /// Puzzle layout: up to 81 characters, digits for givens, anything
    /// else (dots, dashes) for empty cells
    puzzle: Option<String>,

    /// Read puzzles from a file, one layout per line ('#' starts a comment)
    #[arg(long, short = 'f', conflicts_with = "puzzle")]
    file: Option<PathBuf>,

    /// Cancel any solve that runs longer than this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Print the solve report as JSON instead of a rendered grid
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let puzzles = match gather_puzzles(&args) {
        Ok(puzzles) => puzzles,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let timeout = args.timeout.map(Duration::from_millis);
    let mut all_solved = true;

    for layout in &puzzles {
        match run_solve(layout, timeout) {
            Ok(report) => {
                if !(report.valid && report.solved) {
                    all_solved = false;
                }
                print_report(layout, &report, args.json);
            }
            Err(Cancelled) => {
                all_solved = false;
                println!("CANCELLED (timed out)");
            }
        }
    }

    if all_solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn gather_puzzles(args: &Args) -> io::Result<Vec<String>> {
    if let Some(path) = &args.file {
        let text = fs::read_to_string(path)?;
        let puzzles = parse_puzzle_lines(&text);
        log::info!("loaded {} puzzles from {}", puzzles.len(), path.display());
        return Ok(puzzles);
    }
    match &args.puzzle {
        Some(layout) => Ok(vec![layout.clone()]),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "supply a puzzle string or --file",
        )),
    }
}

/// Extract puzzle layouts from a line-oriented text source. Blank lines and
/// '#' comment lines are skipped.
fn parse_puzzle_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Solve one puzzle, optionally bounded by a timeout.
///
/// With a timeout the solve runs on a worker thread while this thread waits
/// on the result channel; if the deadline passes first, the shared token is
/// cancelled and the worker unwinds promptly with `Cancelled`.
fn run_solve(layout: &str, timeout: Option<Duration>) -> Result<SolveReport, Cancelled> {
    let mut solver = Solver::new();
    solver.initialize_board(layout);

    let start = Instant::now();
    let token = CancelToken::new();

    let result = match timeout {
        None => solver.solve(&token),
        Some(limit) => {
            let worker_token = token.clone();
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                let _ = tx.send(solver.solve(&worker_token));
            });
            match rx.recv_timeout(limit) {
                Ok(result) => result,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    token.cancel();
                    // The worker observes the token at its next recursion.
                    rx.recv().unwrap_or(Err(Cancelled))
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => Err(Cancelled),
            }
        }
    };

    if let Ok(report) = &result {
        log::debug!(
            "solved={} iterations={} elapsed={:?}",
            report.solved,
            report.iterations,
            start.elapsed()
        );
    }
    result
}

fn print_report(layout: &str, report: &SolveReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }

    println!("PUZZLE:");
    print!("{}", Board::from_layout(layout));
    if !report.valid {
        println!("INVALID PUZZLE");
    } else if report.solved {
        println!("SOLVED ({} iterations):", report.iterations);
        print!("{}", Board::from_layout(&report.solution));
    } else {
        println!("NO SOLUTION FOUND");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_puzzle_lines_skips_comments_and_blanks() {
        let text = "# easy puzzles\n\n53..7....\n   \n-96-4--3-\n# done\n";
        assert_eq!(parse_puzzle_lines(text), vec!["53..7....", "-96-4--3-"]);
    }

    #[test]
    fn test_parse_puzzle_lines_trims_whitespace() {
        let text = "  12345678.  \n";
        assert_eq!(parse_puzzle_lines(text), vec!["12345678."]);
    }

    #[test]
    fn test_run_solve_without_timeout() {
        let report = run_solve("53..7....", None).unwrap();
        assert!(report.valid);
        assert!(report.solved);
    }

    #[test]
    fn test_run_solve_with_generous_timeout() {
        let report = run_solve("53..7....", Some(Duration::from_secs(60))).unwrap();
        assert!(report.solved);
    }
}
