use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::timeline::{DisplayMode, TimelineRow};
use crate::tui::app::{App, InputMode};
use crate::tui::{bars, theme};

/// Columns reserved for the project name in front of the bars.
const NAME_WIDTH: usize = 24;

/// Header lines above the project rows (year row + unit row).
const AXIS_HEADER_LINES: usize = 2;

const HELP_LINES: [(&str, &str); 8] = [
    ("h/l ←/→", "move month cursor"),
    ("Enter", "show cursor month by day"),
    ("Esc", "back to the 18-month overview"),
    ("j/k ↓/↑", "select project"),
    ("s", "toggle sort by start date"),
    ("c", "cycle classification filter"),
    ("?", "close this help"),
    ("q", "quit"),
];

pub fn draw(frame: &mut Frame, app: &App) {
    // Fill the entire background
    let bg_block = Block::default().style(Style::default().bg(theme::BG));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("  {} ", theme::HEADER_ART),
            Style::default()
                .fg(theme::NEON_CYAN)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(theme::BORDER_DIM)),
        Span::styled(mode_label(app), Style::default().fg(theme::NEON_MAGENTA)),
        Span::styled(
            format!("  today {}", app.drill.today()),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::panel_border(false))
            .style(Style::default().bg(theme::BG)),
    );
    frame.render_widget(header, chunks[0]);

    draw_timeline(frame, app, chunks[1]);

    // Footer
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            "  q: Quit  ?: Help  Enter: Drill  Esc: Overview",
            Style::default().fg(theme::TEXT_DIM),
        ),
        Span::styled("  │ ", Style::default().fg(theme::BORDER_DIM)),
        Span::styled(
            format!(
                "filter: {}  sort: {}",
                app.filter.label(),
                app.sort.label()
            ),
            Style::default().fg(theme::ELECTRIC_BLUE),
        ),
        rejected_span(app),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::panel_border(false))
            .title(Span::styled(" Help ", Style::default().fg(theme::TEXT_DIM)))
            .style(Style::default().bg(theme::BG)),
    );
    frame.render_widget(footer, chunks[2]);

    if app.mode == InputMode::HelpOverlay {
        draw_help(frame);
    }
}

fn mode_label(app: &App) -> String {
    match app.drill.mode() {
        DisplayMode::Overview => "18-month overview".to_string(),
        DisplayMode::DayDetail { month } => format!("{} {} by day", month.abbreviation(), month.year),
    }
}

fn rejected_span(app: &App) -> Span<'static> {
    let count = app.layout.rejected.len();
    if count == 0 {
        Span::raw("")
    } else {
        Span::styled(
            format!("  ⚠ {count} skipped"),
            Style::default().fg(theme::NEON_ORANGE),
        )
    }
}

fn draw_timeline(frame: &mut Frame, app: &App, area: Rect) {
    let window = &app.layout.window;
    let unit_width = app.unit_width();
    let today = app.drill.today_offset();
    let cursor = (!app.drill.is_drilled()).then_some(app.cursor);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(prefixed("", Style::default(), &bars::year_header(window, unit_width)));
    lines.push(prefixed(
        "Project",
        Style::default().fg(theme::TEXT_DIM).add_modifier(Modifier::BOLD),
        &bars::unit_header(window, unit_width, cursor, today),
    ));

    let body_height = (area.height as usize).saturating_sub(2 + AXIS_HEADER_LINES).max(1);
    let first_row = app.selected_row.saturating_sub(body_height - 1);

    let mut shown = 0;
    for (i, row) in app.layout.visible_rows().enumerate().skip(first_row).take(body_height) {
        lines.push(row_line(row, i == app.selected_row, app, unit_width, today));
        shown += 1;
    }
    if shown == 0 {
        lines.push(Line::from(Span::styled(
            "  No projects to show",
            Style::default().fg(theme::TEXT_DIM),
        )));
    }

    let timeline = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::panel_border(true))
            .title(Span::styled(
                " Timeline ",
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(theme::BG)),
    );
    frame.render_widget(timeline, area);
}

fn row_line(row: &TimelineRow, selected: bool, app: &App, unit_width: usize, today: Option<usize>) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let name_fg = if selected { theme::TEXT_BRIGHT } else { theme::TEXT_DIM };
    let label = format!(
        "{marker}{} {}",
        theme::classification_symbol(row.classification),
        row.name
    );
    let cells = bars::bar_cells(row, &app.layout.window, unit_width, today);
    prefixed(&label, Style::default().fg(name_fg), &cells)
}

/// A name column padded to [`NAME_WIDTH`] followed by rendered cells.
fn prefixed(label: &str, style: Style, cells: &[bars::Cell]) -> Line<'static> {
    let mut name: String = label.chars().take(NAME_WIDTH - 1).collect();
    let pad = NAME_WIDTH.saturating_sub(name.chars().count());
    name.push_str(&" ".repeat(pad));

    let mut line = bars::to_line(cells);
    line.spans.insert(0, Span::styled(name, style));
    line
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(48, HELP_LINES.len() as u16 + 2, frame.area());
    let lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:<10}"),
                    Style::default()
                        .fg(theme::NEON_CYAN)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(desc.to_string(), Style::default().fg(theme::TEXT_BRIGHT)),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(true))
                .title(Span::styled(" Keys ", Style::default().fg(theme::NEON_CYAN)))
                .style(Style::default().bg(theme::BG)),
        ),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::models::ProjectRecord;
    use crate::settings::Settings;

    fn app() -> App {
        App::new(
            vec![ProjectRecord {
                id: "p1".to_string(),
                name: "North bridge".to_string(),
                start_date: "2025-01-10".to_string(),
                end_date: "2025-04-20".to_string(),
                classification: "construction".to_string(),
            }],
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            &Settings::default(),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn draws_overview_with_project_name() {
        let screen = render(&app());
        assert!(screen.contains("BUILDLINE"));
        assert!(screen.contains("18-month overview"));
        assert!(screen.contains("North bridge"));
        assert!(screen.contains("2025"));
        assert!(screen.contains("Jan"));
    }

    #[test]
    fn omits_projects_outside_window() {
        let app = App::new(
            vec![
                ProjectRecord {
                    id: "old".to_string(),
                    name: "Ancient job".to_string(),
                    start_date: "2019-03-01".to_string(),
                    end_date: "2019-06-30".to_string(),
                    classification: "maintenance".to_string(),
                },
                ProjectRecord {
                    id: "p1".to_string(),
                    name: "North bridge".to_string(),
                    start_date: "2025-02-01".to_string(),
                    end_date: "2025-04-20".to_string(),
                    classification: "construction".to_string(),
                },
            ],
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            &Settings::default(),
        );
        let screen = render(&app);
        assert!(screen.contains("North bridge"));
        assert!(!screen.contains("Ancient job"));
    }

    #[test]
    fn shows_placeholder_when_nothing_is_in_window() {
        let mut app = app();
        app.drill.drill_into(2026, 6);
        app.recompute();
        let screen = render(&app);
        assert!(!screen.contains("North bridge"));
        assert!(screen.contains("No projects to show"));
    }

    #[test]
    fn draws_day_detail_title() {
        let mut app = app();
        app.handle_key(crossterm::event::KeyEvent::from(crossterm::event::KeyCode::Enter));
        let screen = render(&app);
        assert!(screen.contains("Jan 2025 by day"));
    }

    #[test]
    fn help_overlay_lists_keys() {
        let mut app = app();
        app.mode = InputMode::HelpOverlay;
        let screen = render(&app);
        assert!(screen.contains("cycle classification filter"));
    }

    #[test]
    fn prefixed_pads_name_column() {
        let line = prefixed("abc", Style::default(), &[]);
        assert_eq!(line.spans[0].content.chars().count(), NAME_WIDTH);
    }

    #[test]
    fn centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(48, 10, area);
        assert_eq!(rect, area);
    }
}
