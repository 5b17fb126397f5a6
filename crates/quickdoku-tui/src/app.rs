use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use quickdoku_core::{Board, CancelToken, Cancelled, Position, SolveReport, Solver};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// A solve running on a worker thread.
struct SolveJob {
    token: CancelToken,
    rx: Receiver<Result<SolveReport, Cancelled>>,
    started: Instant,
}

/// The main application state
pub struct App {
    /// The board being edited (shows the solution after a successful solve)
    pub board: Board,
    /// The board as last loaded/reset, for 'r'
    loaded: Board,
    /// Currently selected cell
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    /// Status message
    pub message: Option<String>,
    /// Report from the most recent completed solve
    pub last_report: Option<SolveReport>,
    /// Undo stack of (position, previous digit) pairs
    undo_stack: Vec<(Position, u8)>,
    /// Puzzle list loaded from --file
    puzzles: Vec<String>,
    /// Index into the puzzle list
    puzzle_index: usize,
    /// In-flight solve, if any
    job: Option<SolveJob>,
}

impl App {
    pub fn new(puzzles: Vec<String>) -> Self {
        let board = puzzles
            .first()
            .map_or_else(Board::empty, |layout| Board::from_layout(layout));
        Self {
            board,
            loaded: board,
            cursor: Position::new(0, 0),
            theme: Theme::default(),
            message: None,
            last_report: None,
            undo_stack: Vec::new(),
            puzzles,
            puzzle_index: 0,
            job: None,
        }
    }

    pub fn is_solving(&self) -> bool {
        self.job.is_some()
    }

    /// Seconds the current solve has been running, if one is in flight.
    pub fn solve_elapsed_secs(&self) -> Option<u64> {
        self.job.as_ref().map(|job| job.started.elapsed().as_secs())
    }

    /// Puzzle list position as (1-based index, total), if a list is loaded.
    pub fn puzzle_list_position(&self) -> Option<(usize, usize)> {
        if self.puzzles.is_empty() {
            None
        } else {
            Some((self.puzzle_index + 1, self.puzzles.len()))
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => {
                self.cancel_solve();
                return AppAction::Quit;
            }
            KeyCode::Esc => {
                if self.is_solving() {
                    self.cancel_solve();
                } else {
                    self.message = None;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(c @ '1'..='9') => self.set_cell(c as u8 - b'0'),
            KeyCode::Char('0') | KeyCode::Char(' ') | KeyCode::Backspace | KeyCode::Delete => {
                self.set_cell(0);
            }
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('s') => self.start_solve(),
            KeyCode::Char('c') => self.replace_board(Board::empty()),
            KeyCode::Char('r') => {
                let loaded = self.loaded;
                self.replace_board(loaded);
            }
            KeyCode::Char('n') => self.cycle_puzzle(1),
            KeyCode::Char('p') => self.cycle_puzzle(-1),
            _ => {}
        }
        AppAction::Continue
    }

    /// Poll the worker for a finished solve.
    pub fn tick(&mut self) {
        let result = match &self.job {
            Some(job) => job.rx.try_recv(),
            None => return,
        };
        match result {
            Ok(Ok(report)) => {
                self.message = Some(if !report.valid {
                    "Invalid puzzle: duplicate digit in a row, column, or box".to_string()
                } else if report.solved {
                    self.board = Board::from_layout(&report.solution);
                    format!("Solved in {} iterations", report.iterations)
                } else {
                    "No solution exists".to_string()
                });
                self.last_report = Some(report);
                self.job = None;
            }
            Ok(Err(Cancelled)) => {
                self.message = Some("Solve cancelled".to_string());
                self.job = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.message = Some("Solver thread died".to_string());
                self.job = None;
            }
        }
    }

    fn start_solve(&mut self) {
        if self.is_solving() {
            return;
        }
        self.last_report = None;
        self.message = Some("Solving... (Esc cancels)".to_string());

        let mut solver = Solver::new();
        solver.set_board(self.board);
        let token = CancelToken::new();
        let worker_token = token.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(solver.solve(&worker_token));
        });
        self.job = Some(SolveJob {
            token,
            rx,
            started: Instant::now(),
        });
    }

    fn cancel_solve(&mut self) {
        if let Some(job) = &self.job {
            job.token.cancel();
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let row = (self.cursor.row as isize + d_row).rem_euclid(9) as usize;
        let col = (self.cursor.col as isize + d_col).rem_euclid(9) as usize;
        self.cursor = Position::new(row, col);
    }

    fn set_cell(&mut self, digit: u8) {
        if self.is_solving() {
            return;
        }
        let old = self.board.get(self.cursor);
        if old != digit {
            self.undo_stack.push((self.cursor, old));
            self.board.set(self.cursor, digit);
        }
    }

    fn undo(&mut self) {
        if self.is_solving() {
            return;
        }
        if let Some((pos, digit)) = self.undo_stack.pop() {
            self.board.set(pos, digit);
            self.cursor = pos;
        } else {
            self.message = Some("Nothing to undo".to_string());
        }
    }

    fn replace_board(&mut self, board: Board) {
        if self.is_solving() {
            return;
        }
        self.board = board;
        self.undo_stack.clear();
        self.last_report = None;
        self.message = None;
    }

    fn cycle_puzzle(&mut self, step: isize) {
        if self.is_solving() || self.puzzles.is_empty() {
            return;
        }
        let len = self.puzzles.len() as isize;
        self.puzzle_index = (self.puzzle_index as isize + step).rem_euclid(len) as usize;
        self.loaded = Board::from_layout(&self.puzzles[self.puzzle_index]);
        let loaded = self.loaded;
        self.replace_board(loaded);
        self.message = Some(format!(
            "Puzzle {}/{}",
            self.puzzle_index + 1,
            self.puzzles.len()
        ));
    }
}
