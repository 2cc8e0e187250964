use chrono::NaiveDate;

use super::window::{DisplayMode, TimeUnit, Window, YearMonth, build_window};

/// Tracks whether the timeline shows the rolling overview or a single month
/// at day granularity. "Today" is fixed at construction so every window the
/// controller hands out is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillController {
    today: NaiveDate,
    mode: DisplayMode,
}

impl DrillController {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            mode: DisplayMode::Overview,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_drilled(&self) -> bool {
        matches!(self.mode, DisplayMode::DayDetail { .. })
    }

    /// Switch to day detail for `(year, month)`. Months outside `1..=12`
    /// carry into adjacent years.
    pub fn drill_into(&mut self, year: i32, month: i32) {
        let month = YearMonth::new(year, month);
        tracing::debug!(%month, "drilling into month");
        self.mode = DisplayMode::DayDetail { month };
    }

    /// Drill into the month shown at overview column `index`. Returns `false`
    /// without changing state when already drilled or out of range.
    pub fn drill_into_unit(&mut self, index: usize) -> bool {
        if self.is_drilled() {
            return false;
        }
        match self.window().units().get(index).map(TimeUnit::month) {
            Some(ym) => {
                self.drill_into(ym.year, ym.month as i32);
                true
            }
            None => false,
        }
    }

    pub fn return_to_overview(&mut self) {
        if self.is_drilled() {
            tracing::debug!("returning to overview");
        }
        self.mode = DisplayMode::Overview;
    }

    pub fn window(&self) -> Window {
        build_window(self.mode, self.today)
    }

    /// Column of today's date in the current window, if visible.
    pub fn today_offset(&self) -> Option<usize> {
        self.window().position_of(self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::window::OVERVIEW_MONTHS;

    fn controller() -> DrillController {
        DrillController::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    #[test]
    fn starts_in_overview() {
        let drill = controller();
        assert_eq!(drill.mode(), DisplayMode::Overview);
        assert!(!drill.is_drilled());
        assert_eq!(drill.window().len(), OVERVIEW_MONTHS);
    }

    #[test]
    fn drill_into_builds_day_window() {
        let mut drill = controller();
        drill.drill_into(2025, 2);
        assert_eq!(
            drill.mode(),
            DisplayMode::DayDetail {
                month: YearMonth { year: 2025, month: 2 }
            }
        );
        assert_eq!(drill.window().len(), 28);
    }

    #[test]
    fn round_trip_restores_overview_window() {
        let mut drill = controller();
        let before = drill.window();
        drill.drill_into(2025, 7);
        drill.return_to_overview();
        assert_eq!(drill.window(), before);
        assert_eq!(drill.mode(), DisplayMode::Overview);
    }

    #[test]
    fn re_entering_same_month_is_idempotent() {
        let mut drill = controller();
        drill.drill_into(2025, 3);
        let first = drill.window();
        drill.drill_into(2025, 3);
        assert_eq!(drill.window(), first);
    }

    #[test]
    fn return_from_overview_is_a_noop() {
        let mut drill = controller();
        drill.return_to_overview();
        assert_eq!(drill, controller());
    }

    #[test]
    fn drill_into_unit_uses_overview_column() {
        let mut drill = controller();
        assert!(drill.drill_into_unit(13));
        assert_eq!(
            drill.mode(),
            DisplayMode::DayDetail {
                month: YearMonth { year: 2026, month: 2 }
            }
        );
        assert!(!drill.drill_into_unit(0), "already drilled");
    }

    #[test]
    fn drill_into_unit_out_of_range() {
        let mut drill = controller();
        assert!(!drill.drill_into_unit(OVERVIEW_MONTHS));
        assert!(!drill.is_drilled());
    }

    #[test]
    fn drill_into_normalizes_month_overflow() {
        let mut drill = controller();
        drill.drill_into(2025, 13);
        assert_eq!(
            drill.mode(),
            DisplayMode::DayDetail {
                month: YearMonth { year: 2026, month: 1 }
            }
        );
    }

    #[test]
    fn today_offset_per_mode() {
        let mut drill = controller();
        assert_eq!(drill.today_offset(), Some(0));
        drill.drill_into(2025, 1);
        assert_eq!(drill.today_offset(), Some(14));
        drill.drill_into(2025, 2);
        assert_eq!(drill.today_offset(), None);
    }
}
