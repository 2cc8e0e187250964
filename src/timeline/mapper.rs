//! Interval-to-axis mapping.
//!
//! Converts a project's calendar interval into an offset and length measured
//! in the window's unit (months in the overview, days in day detail), clipped
//! against the window bounds. Both modes go through [`map_interval`] so the
//! clipping rules live in one place.

use chrono::Datelike;
use serde::Serialize;

use crate::models::ProjectInterval;

use super::window::{Window, WindowKind, YearMonth};

/// Bar geometry for one project, in window units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedBar {
    pub project_id: String,
    pub offset: u32,
    pub length: u32,
    /// Set when either end of the original interval lies outside the window.
    pub clipped: bool,
}

impl MappedBar {
    pub fn is_visible(&self) -> bool {
        self.length > 0
    }

    /// First unit past the end of the bar.
    pub fn end(&self) -> u32 {
        self.offset + self.length
    }
}

/// Raw geometry before it is narrowed to unsigned units.
struct Span {
    offset: i64,
    length: i64,
    clipped: bool,
}

pub fn map_interval(interval: &ProjectInterval, window: &Window) -> MappedBar {
    let size = window.len() as i64;

    let span = if interval.is_inverted() {
        tracing::warn!(
            project = %interval.id,
            start = %interval.start,
            end = %interval.end,
            "end date precedes start date, rendering nothing"
        );
        Span {
            offset: 0,
            length: 0,
            clipped: false,
        }
    } else {
        match window.kind() {
            WindowKind::Overview { first } => map_months(interval, first, size),
            WindowKind::DayDetail { month } => map_days(interval, month),
        }
    };

    // Zero-length bars park at the nearest window edge.
    let length = span.length.max(0);
    let offset = if length == 0 {
        span.offset.clamp(0, size)
    } else {
        span.offset
    };

    MappedBar {
        project_id: interval.id.clone(),
        offset: offset as u32,
        length: length as u32,
        clipped: span.clipped,
    }
}

fn map_months(interval: &ProjectInterval, first: YearMonth, size: i64) -> Span {
    let start = YearMonth::of(interval.start);
    let end = YearMonth::of(interval.end);

    let mut offset = first.months_until(start);
    let mut length = start.months_until(end) + 1;
    let mut clipped = false;

    if offset < 0 {
        length += offset;
        offset = 0;
        clipped = true;
    }
    if offset + length > size {
        length = size - offset;
        clipped = true;
    }
    if first.months_until(end) >= size {
        clipped = true;
    }

    Span {
        offset,
        length,
        clipped,
    }
}

fn map_days(interval: &ProjectInterval, month: YearMonth) -> Span {
    let selected = month.index();
    let start = YearMonth::of(interval.start).index();
    let end = YearMonth::of(interval.end).index();
    let days = i64::from(month.days());

    if selected < start {
        return Span {
            offset: days,
            length: 0,
            clipped: true,
        };
    }
    if selected > end {
        return Span {
            offset: 0,
            length: 0,
            clipped: true,
        };
    }

    let start_day = i64::from(interval.start.day());
    let end_day = i64::from(interval.end.day());

    let (offset, length) = match (start == selected, end == selected) {
        (true, true) => (start_day - 1, end_day - start_day + 1),
        (true, false) => (start_day - 1, days - start_day + 1),
        (false, true) => (0, end_day),
        (false, false) => (0, days),
    };

    Span {
        offset,
        length,
        clipped: start != selected || end != selected,
    }
}
