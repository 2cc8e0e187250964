use std::io::Stdout;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::models::{ProjectRecord, WorkClassification};
use crate::settings::Settings;
use crate::timeline::{DrillController, TimelineLayout, layout_pass};
use crate::tui::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    HelpOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// As supplied by the project source.
    Input,
    StartDate,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "input order",
            Self::StartDate => "start date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationFilter {
    All,
    Only(WorkClassification),
}

impl ClassificationFilter {
    fn next(self) -> Self {
        match self {
            Self::All => Self::Only(WorkClassification::Construction),
            Self::Only(WorkClassification::Construction) => Self::Only(WorkClassification::Maintenance),
            Self::Only(WorkClassification::Maintenance) => Self::Only(WorkClassification::Fabrication),
            Self::Only(WorkClassification::Fabrication) => Self::All,
        }
    }

    fn accepts(self, record: &ProjectRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => record.classification == kind.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(kind) => kind.as_str(),
        }
    }
}

pub struct App {
    pub running: bool,
    pub mode: InputMode,
    pub records: Vec<ProjectRecord>,
    pub drill: DrillController,
    pub layout: TimelineLayout,
    /// Overview column the month cursor sits on.
    pub cursor: usize,
    pub selected_row: usize,
    pub sort: SortOrder,
    pub filter: ClassificationFilter,
    pub month_cell_width: u16,
    pub day_cell_width: u16,
}

/// Wraps an index by `delta` within `len`, returning `None` when the list is empty.
fn wrap_index(current: usize, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(((current as isize + delta).rem_euclid(len as isize)) as usize)
}

fn start_key(record: &ProjectRecord) -> (bool, Option<NaiveDate>) {
    let start = record.start();
    (start.is_none(), start)
}

impl App {
    pub fn new(records: Vec<ProjectRecord>, today: NaiveDate, settings: &Settings) -> Self {
        let drill = DrillController::new(today);
        let layout = layout_pass(&[], drill.window());
        let mut app = Self {
            running: true,
            mode: InputMode::Normal,
            records,
            drill,
            layout,
            cursor: 0,
            selected_row: 0,
            sort: SortOrder::Input,
            filter: ClassificationFilter::All,
            month_cell_width: settings.month_cell_width(),
            day_cell_width: settings.day_cell_width(),
        };
        app.recompute();
        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(Duration::from_millis(250))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Records after the classification filter and sort toggle, in display
    /// order.
    pub fn visible_records(&self) -> Vec<ProjectRecord> {
        let mut records: Vec<ProjectRecord> = self
            .records
            .iter()
            .filter(|r| self.filter.accepts(r))
            .cloned()
            .collect();
        if self.sort == SortOrder::StartDate {
            records.sort_by_key(start_key);
        }
        records
    }

    /// Full layout pass against the current drill window.
    pub fn recompute(&mut self) {
        self.layout = layout_pass(&self.visible_records(), self.drill.window());
        self.selected_row = self
            .selected_row
            .min(self.visible_row_count().saturating_sub(1));
    }

    /// Rows with a bar in the current window. `selected_row` indexes these.
    pub fn visible_row_count(&self) -> usize {
        self.layout.visible_rows().count()
    }

    /// Width in cells of one axis unit in the current mode.
    pub fn unit_width(&self) -> usize {
        if self.drill.is_drilled() {
            self.day_cell_width as usize
        } else {
            self.month_cell_width as usize
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::HelpOverlay => self.handle_help_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.mode = InputMode::HelpOverlay,
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('j') | KeyCode::Down => self.navigate(1),
            KeyCode::Char('k') | KeyCode::Up => self.navigate(-1),
            KeyCode::Enter => self.drill_into_cursor(),
            KeyCode::Esc | KeyCode::Backspace => self.return_to_overview(),
            KeyCode::Char('s') => {
                self.sort = match self.sort {
                    SortOrder::Input => SortOrder::StartDate,
                    SortOrder::StartDate => SortOrder::Input,
                };
                self.recompute();
            }
            KeyCode::Char('c') => {
                self.filter = self.filter.next();
                self.recompute();
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// The month cursor only exists in the overview.
    fn move_cursor(&mut self, delta: isize) {
        if self.drill.is_drilled() {
            return;
        }
        if let Some(idx) = wrap_index(self.cursor, self.layout.window.len(), delta) {
            self.cursor = idx;
        }
    }

    fn navigate(&mut self, delta: isize) {
        if let Some(idx) = wrap_index(self.selected_row, self.visible_row_count(), delta) {
            self.selected_row = idx;
        }
    }

    fn drill_into_cursor(&mut self) {
        if self.drill.drill_into_unit(self.cursor) {
            self.recompute();
        }
    }

    fn return_to_overview(&mut self) {
        if self.drill.is_drilled() {
            self.drill.return_to_overview();
            self.recompute();
        }
    }
}
