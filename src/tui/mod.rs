mod app;
mod bars;
mod theme;
mod ui;

pub use app::App;

use std::io::stdout;
use std::panic;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::models::ProjectRecord;
use crate::settings::Settings;

/// Leaves raw mode and the alternate screen on drop.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

pub fn run(records: Vec<ProjectRecord>, today: NaiveDate, settings: &Settings) -> Result<()> {
    let mut app = App::new(records, today, settings);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);
    let _ = panic::take_hook();
    result
}
