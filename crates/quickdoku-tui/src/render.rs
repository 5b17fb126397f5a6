use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use quickdoku_core::Position;
use std::io;

const GRID_X: u16 = 2;
const GRID_Y: u16 = 1;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    execute!(stdout, Hide, Clear(ClearType::All))?;
    render_grid(stdout, app)?;
    render_status(stdout, app)?;
    render_controls(stdout, app)?;
    execute!(stdout, Show)?;
    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Grid layout: each cell is 3 chars wide plus a 1-char border column,
    // with a border row between every cell row. 37 x 19 in total.
    for row in 0..=9u16 {
        let heavy = row % 3 == 0;
        let color = if heavy { theme.box_border } else { theme.border };
        let line = if heavy {
            "+===+===+===+===+===+===+===+===+===+"
        } else {
            "+---+---+---+---+---+---+---+---+---+"
        };
        execute!(
            stdout,
            MoveTo(GRID_X, GRID_Y + row * 2),
            SetForegroundColor(color),
            Print(line)
        )?;
    }

    for row in 0..9 {
        let cell_y = GRID_Y + 1 + row as u16 * 2;
        for col in 0..9 {
            let border_color = if col % 3 == 0 {
                theme.box_border
            } else {
                theme.border
            };
            execute!(
                stdout,
                MoveTo(GRID_X + col as u16 * 4, cell_y),
                SetForegroundColor(border_color),
                Print("|")
            )?;

            let pos = Position::new(row, col);
            let digit = app.board.get(pos);
            let text = if digit == 0 {
                " . ".to_string()
            } else {
                format!(" {digit} ")
            };

            let bg = if pos == app.cursor {
                theme.selected_bg
            } else {
                theme.bg
            };
            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(theme.digit),
                Print(text),
                SetBackgroundColor(theme.bg)
            )?;
        }
        execute!(
            stdout,
            MoveTo(GRID_X + 36, cell_y),
            SetForegroundColor(theme.box_border),
            Print("|")
        )?;
    }

    Ok(())
}

fn render_status(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let y = GRID_Y + 20;

    if app.is_solving() {
        let elapsed = app.solve_elapsed_secs().unwrap_or(0);
        execute!(
            stdout,
            MoveTo(GRID_X, y),
            SetForegroundColor(theme.info),
            Print(format!("Solving... {elapsed}s (Esc cancels)"))
        )?;
        return Ok(());
    }

    if let Some(msg) = &app.message {
        let color = match &app.last_report {
            Some(report) if report.solved => theme.success,
            Some(report) if !report.valid => theme.error,
            _ => theme.info,
        };
        execute!(
            stdout,
            MoveTo(GRID_X, y),
            SetForegroundColor(color),
            Print(msg)
        )?;
    }

    if let Some((index, total)) = app.puzzle_list_position() {
        execute!(
            stdout,
            MoveTo(GRID_X, y + 1),
            SetForegroundColor(theme.info),
            Print(format!("Puzzle {index}/{total}  (n: next, p: previous)"))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    let y = GRID_Y + 23;
    let bindings = [
        ("arrows/hjkl", "move"),
        ("1-9", "set"),
        ("0/space", "clear cell"),
        ("u", "undo"),
        ("s", "solve"),
        ("c", "clear board"),
        ("r", "reset"),
        ("q", "quit"),
    ];

    let mut x = GRID_X;
    for (keys, action) in bindings {
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(theme.key),
            Print(keys),
            SetForegroundColor(theme.fg),
            Print(format!(" {action}  "))
        )?;
        x += keys.len() as u16 + action.len() as u16 + 3;
    }

    Ok(())
}
