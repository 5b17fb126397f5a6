//! The backtracking search engine.
//!
//! A solve first validates the stored puzzle against the precomputed
//! conflict sets, then recursively fills cells. At each step the search
//! scans all 27 groups for the (group, digit) pair with the fewest legal
//! placements and branches on that pair, which keeps the tree narrow enough
//! that no candidate bookkeeping beyond the conflict scan is needed.

use crate::board::Board;
use crate::cancel::{CancelToken, Cancelled};
use crate::topology::{Topology, CELL_COUNT, GROUP_SIZE};
use serde::{Deserialize, Serialize};

/// Outcome of a completed (non-cancelled) solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Whether the initial board was free of duplicates. When false the
    /// search never ran.
    pub valid: bool,
    /// Whether a complete assignment was found.
    pub solved: bool,
    /// The 81-digit solution in row-major order; empty unless `solved`.
    pub solution: String,
    /// Recursive search entries. Diagnostic only.
    pub iterations: u64,
}

/// The Sudoku solver: precomputed topology plus the current puzzle.
///
/// The topology is built once at construction and shared by every solve.
/// The stored board is the caller's puzzle; each solve works on its own
/// private copy, so repeated calls on the same puzzle return identical
/// reports.
pub struct Solver {
    topology: Topology,
    board: Board,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with an empty board.
    pub fn new() -> Self {
        Self {
            topology: Topology::new(),
            board: Board::empty(),
        }
    }

    /// Store the puzzle described by a layout string (see
    /// [`Board::from_layout`] for the accepted format).
    pub fn initialize_board(&mut self, layout: &str) {
        self.board = Board::from_layout(layout);
    }

    /// Store an already-built board as the current puzzle.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// The currently stored puzzle.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Solve the stored puzzle.
    ///
    /// Returns `Err(Cancelled)` if the token was triggered before the search
    /// finished; otherwise the report says whether the puzzle was valid and,
    /// if so, whether a solution was found.
    pub fn solve(&self, cancel: &CancelToken) -> Result<SolveReport, Cancelled> {
        let working = *self.board.cells();

        if !self.is_board_valid(&working) {
            return Ok(SolveReport {
                valid: false,
                solved: false,
                solution: String::new(),
                iterations: 0,
            });
        }

        let mut search = Search {
            topology: &self.topology,
            board: working,
            solution: [0; CELL_COUNT],
            solved: false,
            iterations: 0,
            cancel,
        };
        search.run(self.board.given_count())?;

        let solution = if search.solved {
            search.solution.iter().map(|&d| char::from(b'0' + d)).collect()
        } else {
            String::new()
        };

        Ok(SolveReport {
            valid: true,
            solved: search.solved,
            solution,
            iterations: search.iterations,
        })
    }

    /// Check the board for duplicates: every filled cell is scanned against
    /// its 20 conflict cells, stopping at the first clash.
    fn is_board_valid(&self, board: &[u8; CELL_COUNT]) -> bool {
        for cell in 0..CELL_COUNT {
            let digit = board[cell];
            if digit == 0 {
                continue;
            }
            for &other in self.topology.conflicts(cell) {
                if board[other] == digit {
                    return false;
                }
            }
        }
        true
    }
}

/// Mutable state for one solve invocation.
struct Search<'a> {
    topology: &'a Topology,
    board: [u8; CELL_COUNT],
    solution: [u8; CELL_COUNT],
    solved: bool,
    iterations: u64,
    cancel: &'a CancelToken,
}

impl Search<'_> {
    /// Recursive fill. `depth` is the number of cells filled so far; 81
    /// means the working board is a complete solution (each placement was
    /// checked against its conflict set before being made).
    fn run(&mut self, depth: usize) -> Result<(), Cancelled> {
        if self.solved {
            return Ok(());
        }
        if self.cancel.is_cancelled() {
            return Err(Cancelled);
        }
        self.iterations += 1;

        if depth == CELL_COUNT {
            self.solution = self.board;
            self.solved = true;
            return Ok(());
        }

        // Find the (group, digit) pair with the fewest legal cells. Ties go
        // to the first pair found, scanning groups in order (rows, columns,
        // boxes) and digits ascending.
        let mut best_cells = [0usize; GROUP_SIZE];
        let mut best_count = 10;
        let mut best_digit = 0u8;

        'groups: for group in self.topology.groups() {
            let mut present = [false; 10];
            for &cell in group {
                present[self.board[cell] as usize] = true;
            }

            for digit in 1..=9u8 {
                if present[digit as usize] {
                    continue;
                }

                // Collect empty cells where this digit is legal, giving up
                // once the count can no longer beat the current best.
                let mut cells = [0usize; GROUP_SIZE];
                let mut count = 0;
                for &cell in group {
                    if count >= best_count {
                        break;
                    }
                    if self.board[cell] != 0 {
                        continue;
                    }
                    let legal = self
                        .topology
                        .conflicts(cell)
                        .iter()
                        .all(|&other| self.board[other] != digit);
                    if legal {
                        cells[count] = cell;
                        count += 1;
                    }
                }

                if count == 0 {
                    // A missing digit with nowhere to go: this branch is a
                    // dead end no matter what the other groups look like.
                    best_count = 10;
                    break 'groups;
                }
                if count < best_count {
                    best_cells = cells;
                    best_count = count;
                    best_digit = digit;
                }
            }
        }

        if best_count < 10 {
            for &cell in &best_cells[..best_count] {
                self.board[cell] = best_digit;
                self.run(depth + 1)?;
                self.board[cell] = 0;
                if self.solved {
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    const CLASSIC_EASY: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    // Arto Inkala's puzzle, about as hard as backtracking search gets.
    const CLASSIC_HARD: &str =
        "800000000003600000070090200050007000000045700000100030001000068008500010090000400";

    fn solve_layout(layout: &str) -> SolveReport {
        let mut solver = Solver::new();
        solver.initialize_board(layout);
        solver.solve(&CancelToken::new()).expect("not cancelled")
    }

    /// Assert the solution is a complete valid grid that preserves the
    /// puzzle's given digits.
    fn assert_solution(report: &SolveReport, layout: &str) {
        assert!(report.valid);
        assert!(report.solved);
        assert_eq!(report.solution.len(), 81);

        let solution = Board::from_layout(&report.solution);
        let topology = Topology::new();
        for group in topology.groups() {
            let mut seen = [false; 10];
            for &cell in group {
                let digit = solution.cells()[cell] as usize;
                assert!((1..=9).contains(&digit), "incomplete solution");
                assert!(!seen[digit], "digit {digit} repeated in a group");
                seen[digit] = true;
            }
        }

        let givens = Board::from_layout(layout);
        for cell in 0..81 {
            let given = givens.cells()[cell];
            if given != 0 {
                assert_eq!(solution.cells()[cell], given, "given at {cell} changed");
            }
        }
    }

    #[test]
    fn test_solve_classic_easy() {
        let report = solve_layout(CLASSIC_EASY);
        assert_solution(&report, CLASSIC_EASY);
        assert!(report.iterations > 0);
    }

    #[test]
    fn test_solve_classic_hard() {
        let report = solve_layout(CLASSIC_HARD);
        assert_solution(&report, CLASSIC_HARD);
    }

    #[test]
    fn test_solve_dotted_layout() {
        // The dotted/short form is normalized, not rejected.
        let report = solve_layout("53..7....");
        assert_solution(&report, "53..7....");
    }

    #[test]
    fn test_empty_board_has_a_solution() {
        let report = solve_layout("");
        assert_solution(&report, "");
    }

    #[test]
    fn test_duplicate_in_row_is_invalid() {
        let report = solve_layout("55.......");
        assert!(!report.valid);
        assert!(!report.solved);
        assert!(report.solution.is_empty());
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn test_duplicate_in_column_is_invalid() {
        let mut board = Board::empty();
        board.set(Position::new(0, 4), 7);
        board.set(Position::new(6, 4), 7);
        let mut solver = Solver::new();
        solver.set_board(board);
        let report = solver.solve(&CancelToken::new()).unwrap();
        assert!(!report.valid);
    }

    #[test]
    fn test_duplicate_in_box_is_invalid() {
        // (0,0) and (1,1) share the top-left box but no row or column.
        let mut board = Board::empty();
        board.set(Position::new(0, 0), 3);
        board.set(Position::new(1, 1), 3);
        let mut solver = Solver::new();
        solver.set_board(board);
        let report = solver.solve(&CancelToken::new()).unwrap();
        assert!(!report.valid);
    }

    #[test]
    fn test_swapped_givens_make_puzzle_invalid() {
        // Copy the first row's 5 onto another cell of the same row.
        let mut layout: Vec<u8> = CLASSIC_EASY.bytes().collect();
        layout[2] = b'5';
        let report = solve_layout(std::str::from_utf8(&layout).unwrap());
        assert!(!report.valid);
    }

    #[test]
    fn test_valid_but_unsolvable() {
        // Row 0 holds 1..8, so its last cell needs a 9, but the 9 below it
        // in the same column rules that out. No duplicates anywhere.
        let layout = "12345678.\
                      ........9";
        let report = solve_layout(layout);
        assert!(report.valid);
        assert!(!report.solved);
        assert!(report.solution.is_empty());
    }

    #[test]
    fn test_precancelled_token_aborts() {
        let mut solver = Solver::new();
        solver.initialize_board(CLASSIC_EASY);
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(solver.solve(&token), Err(Cancelled));
    }

    #[test]
    fn test_cancelled_invalid_board_still_reports_invalid() {
        // Validation runs before the first cancellation check, so an
        // invalid board short-circuits even with a triggered token.
        let mut solver = Solver::new();
        solver.initialize_board("55.......");
        let token = CancelToken::new();
        token.cancel();
        let report = solver.solve(&token).unwrap();
        assert!(!report.valid);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let mut solver = Solver::new();
        solver.initialize_board(CLASSIC_EASY);
        let token = CancelToken::new();
        let first = solver.solve(&token).unwrap();
        let second = solver.solve(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_solver_board_is_not_mutated_by_solve() {
        let mut solver = Solver::new();
        solver.initialize_board(CLASSIC_EASY);
        let before = *solver.board();
        solver.solve(&CancelToken::new()).unwrap();
        assert_eq!(*solver.board(), before);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = solve_layout(CLASSIC_EASY);
        let json = serde_json::to_string(&report).unwrap();
        let back: SolveReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
