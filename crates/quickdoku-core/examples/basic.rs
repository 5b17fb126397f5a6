//! Basic example of using the Sudoku engine

use quickdoku_core::{Board, CancelToken, Solver};

fn main() {
    let puzzle = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    let mut solver = Solver::new();
    solver.initialize_board(puzzle);

    println!("Puzzle:");
    println!("{}", solver.board());
    println!("Given cells: {}", solver.board().given_count());

    println!("Solving...\n");
    match solver.solve(&CancelToken::new()) {
        Ok(report) if report.solved => {
            println!("Solution (after {} iterations):", report.iterations);
            println!("{}", Board::from_layout(&report.solution));
        }
        Ok(report) if !report.valid => println!("Invalid puzzle"),
        Ok(_) => println!("No solution found"),
        Err(_) => println!("Cancelled"),
    }
}
