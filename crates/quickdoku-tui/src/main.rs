mod app;
mod render;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quickdoku-tui", about = "Interactive Sudoku grid editor and solver")]
struct Args {
    /// Load puzzles from a file, one layout per line ('#' starts a comment)
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let puzzles = match &args.file {
        Some(path) => fs::read_to_string(path)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, App::new(puzzles));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = &result {
        eprintln!("Error: {e}");
    }

    result
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    loop {
        render::render(stdout, &app)?;
        stdout.flush()?;

        // Short poll so worker results and the solve timer stay fresh.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        app.tick();
    }

    Ok(())
}
