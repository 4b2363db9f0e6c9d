use chrono::NaiveDate;
use std::collections::HashMap;

use crate::journal::calendar::{bucket_month, DailyStats, MonthGrid, YearMonth};
use crate::journal::filter::DateRange;
use crate::models::Trade;

/// State behind the month view: which month is shown, the active date
/// filter and the day opened for detail.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub month: YearMonth,
    pub filter: DateRange,
    pub selected_day: Option<u32>,
}

impl CalendarView {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            filter: DateRange::default(),
            selected_day: None,
        }
    }

    pub fn today() -> Self {
        Self::new(YearMonth::containing(chrono::Utc::now().date_naive()))
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
        self.selected_day = None;
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
        self.selected_day = None;
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.month = YearMonth::containing(date);
        self.selected_day = None;
    }

    pub fn set_filter(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.filter = DateRange::new(from, to);
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.month)
    }

    pub fn buckets(&self, trades: &[Trade]) -> HashMap<String, DailyStats> {
        bucket_month(trades, self.month, &self.filter)
    }

    /// Opens `day` only if it has at least one trade. Returns whether the
    /// selection changed.
    pub fn select_day(&mut self, day: u32, buckets: &HashMap<String, DailyStats>) -> bool {
        match buckets.get(&day.to_string()) {
            Some(stats) if !stats.trades_list.is_empty() => {
                self.selected_day = Some(day);
                true
            }
            _ => false,
        }
    }

    pub fn close_day(&mut self) {
        self.selected_day = None;
    }

    pub fn selected<'a>(&self, buckets: &'a HashMap<String, DailyStats>) -> Option<&'a DailyStats> {
        self.selected_day.and_then(|day| buckets.get(&day.to_string()))
    }
}
