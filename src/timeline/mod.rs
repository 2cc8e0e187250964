//! Timeline layout engine.
//!
//! A layout pass takes the upstream project list, the window selected by the
//! [`DrillController`] and produces one [`TimelineRow`] per project, in input
//! order. Nothing is cached between passes.

pub mod drill;
pub mod mapper;
pub mod phases;
pub mod window;

pub use drill::DrillController;
pub use mapper::{MappedBar, map_interval};
pub use phases::{PhaseSegment, segment_phases};
pub use window::{DisplayMode, Window, WindowKind, YearMonth};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::LayoutError;
use crate::models::{ProjectInterval, ProjectRecord, WorkClassification};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub id: String,
    pub name: String,
    pub classification: WorkClassification,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bar: MappedBar,
    /// Present only for classifications that are broken into phases.
    pub phases: Option<[PhaseSegment; 4]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    pub window: Window,
    pub rows: Vec<TimelineRow>,
    #[serde(skip)]
    pub rejected: Vec<LayoutError>,
}

impl TimelineLayout {
    /// Rows with something to draw in the current window.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TimelineRow> {
        self.rows.iter().filter(|row| row.bar.is_visible())
    }
}

/// Lay out a single record against `window`.
pub fn layout_row(record: &ProjectRecord, window: &Window) -> Result<TimelineRow, LayoutError> {
    let interval = ProjectInterval::parse(record)?;
    let bar = map_interval(&interval, window);
    let phases = (interval.classification.has_phases() && bar.is_visible())
        .then(|| segment_phases(bar.length));

    Ok(TimelineRow {
        id: interval.id,
        name: record.display_name().to_string(),
        classification: interval.classification,
        start: interval.start,
        end: interval.end,
        bar,
        phases,
    })
}

/// Lay out every record. Records that fail to parse are collected in
/// `rejected` and skipped; the others are unaffected.
pub fn layout_pass(records: &[ProjectRecord], window: Window) -> TimelineLayout {
    let mut rows = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match layout_row(record, &window) {
            Ok(row) => rows.push(row),
            Err(err) => {
                tracing::warn!(project = %err.project_id(), "skipping project: {err}");
                rejected.push(err);
            }
        }
    }

    tracing::debug!(
        rows = rows.len(),
        rejected = rejected.len(),
        units = window.len(),
        "layout pass complete"
    );

    TimelineLayout {
        window,
        rows,
        rejected,
    }
}
