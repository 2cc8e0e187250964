use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::ProjectRecord;
use crate::settings::Settings;
use crate::source::{default_projects_path, load_projects};
use crate::timeline::{DisplayMode, DrillController, TimelineLayout, TimelineRow, WindowKind, YearMonth, layout_pass};

/// Pick the reference date: explicit flag, then settings, then the local clock.
pub fn resolve_today(flag: Option<NaiveDate>, settings: &Settings) -> Result<NaiveDate> {
    if let Some(today) = flag {
        return Ok(today);
    }
    Ok(settings
        .today()?
        .unwrap_or_else(|| chrono::Local::now().date_naive()))
}

pub fn load_records(file: Option<PathBuf>, dir: &Path, settings: &Settings) -> Result<Vec<ProjectRecord>> {
    let path = file.unwrap_or_else(|| default_projects_path(dir, settings));
    load_projects(&path)
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    display: DisplayMode,
    #[serde(flatten)]
    layout: &'a TimelineLayout,
    rejected: Vec<String>,
}

/// Run one layout pass and print it, drilled into `month` when given.
pub fn run_layout(
    records: &[ProjectRecord],
    today: NaiveDate,
    month: Option<YearMonth>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut drill = DrillController::new(today);
    if let Some(month) = month {
        drill.drill_into(month.year, month.month as i32);
    }
    let layout = layout_pass(records, drill.window());

    if json {
        let report = LayoutReport {
            display: drill.mode(),
            layout: &layout,
            rejected: layout.rejected.iter().map(ToString::to_string).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("failed to serialize layout")?;
        writeln!(out)?;
    } else {
        out.write_all(render_text(&layout).as_bytes())?;
    }
    Ok(())
}

fn render_text(layout: &TimelineLayout) -> String {
    let window = &layout.window;
    let mut text = match window.kind() {
        WindowKind::Overview { first } => format!(
            "window: {} .. {} ({} months)\n",
            first,
            first.add_months(window.len() as i64 - 1),
            window.len()
        ),
        WindowKind::DayDetail { month } => format!("window: {} ({} days)\n", month, window.len()),
    };

    text.push_str(&format!(
        "{} of {} projects visible\n",
        layout.visible_rows().count(),
        layout.rows.len()
    ));
    text.push_str(&format!(
        "{:<16} {:<13} {:>6} {:>6}  {:<7} phases\n",
        "id", "classification", "offset", "length", "clipped"
    ));
    for row in &layout.rows {
        text.push_str(&format!(
            "{:<16} {:<13} {:>6} {:>6}  {:<7} {}\n",
            row.id,
            row.classification.as_str(),
            row.bar.offset,
            row.bar.length,
            if row.bar.clipped { "yes" } else { "no" },
            phase_summary(row),
        ));
    }
    for err in &layout.rejected {
        text.push_str(&format!("skipped: {err}\n"));
    }
    text
}

fn phase_summary(row: &TimelineRow) -> String {
    match &row.phases {
        Some(phases) => phases
            .iter()
            .map(|p| p.length.to_string())
            .collect::<Vec<_>>()
            .join("/"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str, start: &str, end: &str, classification: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: String::new(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            classification: classification.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn output(records: &[ProjectRecord], month: Option<YearMonth>, json: bool) -> String {
        let mut buf = Vec::new();
        run_layout(records, today(), month, json, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_resolve_today_precedence() {
        let settings = Settings {
            today: Some("2024-06-01".to_string()),
            ..Settings::default()
        };
        let flag = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(resolve_today(Some(flag), &settings).unwrap(), flag);
        assert_eq!(
            resolve_today(None, &settings).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_resolve_today_rejects_bad_setting() {
        let settings = Settings {
            today: Some("yesterday".to_string()),
            ..Settings::default()
        };
        assert!(resolve_today(None, &settings).is_err());
    }

    #[test]
    fn test_text_overview() {
        let text = output(
            &[
                record("bridge", "2025-01-15", "2025-03-10", "construction"),
                record("pump", "2024-11-01", "2025-01-20", "maintenance"),
            ],
            None,
            false,
        );
        assert!(text.starts_with("window: 2025-01 .. 2026-06 (18 months)\n2 of 2 projects visible\n"));
        let bridge = text.lines().find(|l| l.starts_with("bridge")).unwrap();
        assert!(bridge.contains("construction"));
        assert!(bridge.ends_with("no      1/1/1/0"));
        let pump = text.lines().find(|l| l.starts_with("pump")).unwrap();
        assert!(pump.contains("yes"));
        assert!(pump.ends_with('-'));
    }

    #[test]
    fn test_text_day_detail_and_skipped() {
        let text = output(
            &[
                record("weld", "2025-02-10", "2025-02-10", "fabrication"),
                record("bad", "2025-02-31", "2025-03-01", "fabrication"),
            ],
            Some(YearMonth { year: 2025, month: 2 }),
            false,
        );
        assert!(text.starts_with("window: 2025-02 (28 days)\n"));
        assert!(text.contains("skipped: Malformed interval for project bad"));
    }

    #[test]
    fn test_json_report() {
        let text = output(
            &[record("weld", "2025-02-10", "2025-02-10", "construction")],
            Some(YearMonth { year: 2025, month: 2 }),
            true,
        );
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["display"]["mode"], "day_detail");
        let row = &value["rows"][0];
        assert_eq!(row["bar"]["offset"], 9);
        assert_eq!(row["bar"]["length"], 1);
        assert_eq!(row["phases"][0]["phase"], "contract");
        assert_eq!(value["rejected"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_load_records_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(
            &path,
            r#"[{"id": "x", "start_date": "2025-01-01", "end_date": "2025-01-02", "classification": "maintenance"}]"#,
        )
        .unwrap();
        let records = load_records(Some(path), dir.path(), &Settings::default()).unwrap();
        assert_eq!(records.len(), 1);
    }
}
