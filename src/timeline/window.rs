use std::fmt;
use std::str::FromStr;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Number of months shown by the rolling overview.
pub const OVERVIEW_MONTHS: usize = 18;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month. `month` is always in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Builds a month, carrying out-of-range months into neighbouring years
    /// (month 13 of 2025 is January 2026, month 0 is December 2024).
    pub fn new(year: i32, month: i32) -> Self {
        Self::from_index(i64::from(year) * 12 + i64::from(month) - 1)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months since year 0; consecutive months differ by exactly one.
    pub fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    pub fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn add_months(self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: YearMonth) -> i64 {
        other.index() - self.index()
    }

    pub fn days(self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ if is_leap_year(self.year) => 29,
            _ => 28,
        }
    }

    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .with_context(|| format!("invalid month {s:?}, expected YYYY-MM"))?;
        let year: i32 = year
            .parse()
            .with_context(|| format!("invalid year in {s:?}"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("invalid month in {s:?}"))?;
        if !(1..=12).contains(&month) {
            anyhow::bail!("month out of range in {s:?}");
        }
        Ok(Self { year, month })
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The display granularity selected by the drill controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    Overview,
    DayDetail { month: YearMonth },
}

/// A single column on the timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TimeUnit {
    Month(YearMonth),
    Day(NaiveDate),
}

impl TimeUnit {
    pub fn year(&self) -> i32 {
        match self {
            Self::Month(ym) => ym.year,
            Self::Day(date) => date.year(),
        }
    }

    pub fn month(&self) -> YearMonth {
        match self {
            Self::Month(ym) => *ym,
            Self::Day(date) => YearMonth::of(*date),
        }
    }

    /// Short header label: month abbreviation or day of month.
    pub fn label(&self) -> String {
        match self {
            Self::Month(ym) => ym.abbreviation().to_string(),
            Self::Day(date) => date.day().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowKind {
    Overview { first: YearMonth },
    DayDetail { month: YearMonth },
}

/// A contiguous run of units sharing the same year, for the header's year row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub year: i32,
    pub offset: usize,
    pub len: usize,
}

/// The visible, ordered, gap-free sequence of axis units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    kind: WindowKind,
    units: Vec<TimeUnit>,
}

/// Build the window for `mode`. The overview is anchored on the month of
/// `reference`; day detail ignores `reference` and covers the selected month.
pub fn build_window(mode: DisplayMode, reference: NaiveDate) -> Window {
    match mode {
        DisplayMode::Overview => {
            let first = YearMonth::of(reference);
            let units = (0..OVERVIEW_MONTHS as i64)
                .map(|i| TimeUnit::Month(first.add_months(i)))
                .collect();
            Window {
                kind: WindowKind::Overview { first },
                units,
            }
        }
        DisplayMode::DayDetail { month } => {
            let units = (1..=month.days())
                .filter_map(|day| month.day(day))
                .map(TimeUnit::Day)
                .collect();
            Window {
                kind: WindowKind::DayDetail { month },
                units,
            }
        }
    }
}

impl Window {
    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn units(&self) -> &[TimeUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Group consecutive units by year, in axis order.
    pub fn year_spans(&self) -> Vec<YearSpan> {
        let mut spans: Vec<YearSpan> = Vec::new();
        for (offset, unit) in self.units.iter().enumerate() {
            match spans.last_mut() {
                Some(span) if span.year == unit.year() => span.len += 1,
                _ => spans.push(YearSpan {
                    year: unit.year(),
                    offset,
                    len: 1,
                }),
            }
        }
        spans
    }

    fn month_range(&self) -> (YearMonth, YearMonth) {
        match self.kind {
            WindowKind::Overview { first } => (first, first.add_months(self.len() as i64 - 1)),
            WindowKind::DayDetail { month } => (month, month),
        }
    }

    /// Whether the window begins after `date`.
    pub fn starts_after(&self, date: NaiveDate) -> bool {
        YearMonth::of(date) < self.month_range().0
    }

    /// Whether the window ends before `date`.
    pub fn ends_before(&self, date: NaiveDate) -> bool {
        YearMonth::of(date) > self.month_range().1
    }

    /// Axis position of `date`, if it falls inside the window.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        match self.kind {
            WindowKind::Overview { first } => {
                let offset = first.months_until(YearMonth::of(date));
                usize::try_from(offset).ok().filter(|&o| o < self.len())
            }
            WindowKind::DayDetail { month } => {
                (YearMonth::of(date) == month).then(|| date.day() as usize - 1)
            }
        }
    }
}
