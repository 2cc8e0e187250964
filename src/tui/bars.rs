//! Character-cell renderer for the timeline.
//!
//! Turns window units and [`TimelineRow`] geometry into rows of [`Cell`]s.
//! Each axis unit is `unit_width` cells wide; converting abstract units to
//! terminal columns happens only here.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::timeline::{TimelineRow, Window, WindowKind};

use super::theme;

// ── Cell ─────────────────────────────────────────────────────────────

/// A single character cell of a rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

fn blank_row(window: &Window, unit_width: usize) -> Vec<Cell> {
    vec![Cell::default(); window.len() * unit_width]
}

/// Write `text` from `x`, truncated to `max` cells and to the row.
fn put_str(cells: &mut [Cell], x: usize, max: usize, text: &str, style: Style) {
    for (i, ch) in text.chars().take(max).enumerate() {
        if let Some(cell) = cells.get_mut(x + i) {
            *cell = Cell { ch, style };
        }
    }
}

fn fill(cells: &mut [Cell], from: usize, to: usize, ch: char, style: Style) {
    let to = to.min(cells.len());
    for cell in cells.iter_mut().take(to).skip(from) {
        *cell = Cell { ch, style };
    }
}

// ── Headers ──────────────────────────────────────────────────────────

/// Top header row: one label per year in the overview, month and year in day
/// detail.
pub fn year_header(window: &Window, unit_width: usize) -> Vec<Cell> {
    let mut cells = blank_row(window, unit_width);
    let style = Style::default().fg(theme::TEXT_BRIGHT);
    match window.kind() {
        WindowKind::Overview { .. } => {
            for span in window.year_spans() {
                put_str(
                    &mut cells,
                    span.offset * unit_width,
                    span.len * unit_width,
                    &span.year.to_string(),
                    style,
                );
            }
        }
        WindowKind::DayDetail { month } => {
            let label = format!("{} {}", month.abbreviation(), month.year);
            let width = cells.len();
            put_str(&mut cells, 0, width, &label, style);
        }
    }
    cells
}

/// Second header row: month abbreviations or day numbers. `cursor` is
/// highlighted, `today` drawn in the today colour.
pub fn unit_header(
    window: &Window,
    unit_width: usize,
    cursor: Option<usize>,
    today: Option<usize>,
) -> Vec<Cell> {
    let mut cells = blank_row(window, unit_width);
    for (i, unit) in window.units().iter().enumerate() {
        let style = if cursor == Some(i) {
            theme::header_style(true)
        } else if today == Some(i) {
            theme::today_style()
        } else {
            theme::header_style(false)
        };
        let x = i * unit_width;
        fill(&mut cells, x, x + unit_width, ' ', style);
        put_str(&mut cells, x, unit_width, &unit.label(), style);
    }
    cells
}

// ── Bars ─────────────────────────────────────────────────────────────

/// Render one project row: grid marks, today marker, then the bar.
///
/// Phase segments that run past the bar end are cut at the bar end. A clipped
/// edge is marked with an arrow on the side where the project continues
/// outside the window.
pub fn bar_cells(row: &TimelineRow, window: &Window, unit_width: usize, today: Option<usize>) -> Vec<Cell> {
    let mut cells = blank_row(window, unit_width);

    if unit_width > 1 {
        for unit in 0..window.len() {
            cells[unit * unit_width] = Cell {
                ch: theme::GRID_MARK,
                style: theme::grid_style(),
            };
        }
    }
    if let Some(cell) = today.and_then(|t| cells.get_mut(t * unit_width)) {
        *cell = Cell {
            ch: theme::TODAY_MARK,
            style: theme::today_style(),
        };
    }

    let bar = &row.bar;
    if !bar.is_visible() {
        return cells;
    }

    let bar_start = bar.offset as usize * unit_width;
    let bar_end = (bar.end() as usize * unit_width).min(cells.len());

    match &row.phases {
        Some(phases) => {
            for segment in phases {
                let segment = segment.absolute(bar);
                let from = segment.offset as usize * unit_width;
                let to = (segment.end() as usize * unit_width).min(bar_end);
                if from < to {
                    fill(&mut cells, from, to, theme::BAR_FULL, theme::phase_style(segment.phase));
                }
            }
        }
        None => fill(
            &mut cells,
            bar_start,
            bar_end,
            theme::BAR_FULL,
            theme::classification_style(row.classification),
        ),
    }

    if bar.clipped {
        if window.starts_after(row.start)
            && let Some(cell) = cells.get_mut(bar_start)
        {
            cell.ch = theme::CLIP_LEFT;
        }
        if window.ends_before(row.end)
            && bar_end > 0
            && let Some(cell) = cells.get_mut(bar_end - 1)
        {
            cell.ch = theme::CLIP_RIGHT;
        }
    }

    cells
}

/// Collapse cells into a ratatui line, merging runs that share a style.
pub fn to_line(cells: &[Cell]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for cell in cells {
        if run_style != Some(cell.style) {
            if let Some(style) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), style));
            }
            run_style = Some(cell.style);
        }
        run.push(cell.ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}
