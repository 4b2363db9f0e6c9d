use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::journal::filter::DateRange;
use crate::models::{DateParts, Trade};

/// 6 rows x 7 columns, Monday first.
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. `month0` is 0-indexed (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month0: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = String;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month0)
            .ok_or_else(|| format!("invalid month {}-{}", raw.year, raw.month0))
    }
}

impl YearMonth {
    /// `None` for `month0 > 11` or a year chrono cannot represent.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 > 11 {
            return None;
        }
        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        first.checked_add_months(Months::new(1))?;
        Some(Self { year, month0 })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Parses `YYYY-MM` (1-indexed month, as written in trade dates).
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        let year = year.trim().parse::<i32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        Self::new(year, month.checked_sub(1)?)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(31)
    }

    /// Weekday of the 1st with Monday = 0 .. Sunday = 6.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first_day().weekday().num_days_from_monday()
    }

    /// Previous month; stays put at the edge of chrono's range.
    pub fn prev(&self) -> Self {
        let (year, month0) = if self.month0 == 0 {
            (self.year - 1, 11)
        } else {
            (self.year, self.month0 - 1)
        };
        Self::new(year, month0).unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        let (year, month0) = if self.month0 == 11 {
            (self.year + 1, 0)
        } else {
            (self.year, self.month0 + 1)
        };
        Self::new(year, month0).unwrap_or(*self)
    }

    fn matches(&self, parts: &DateParts) -> bool {
        parts.year == self.year && parts.month0 == self.month0 as i32
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}

/// Everything traded on one calendar day of the viewed month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    /// Date string of the first trade that opened the bucket.
    pub date: String,
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Individual P&L values in collection order.
    pub results: Vec<f64>,
    pub trades_list: Vec<Trade>,
}

impl DailyStats {
    fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            pnl: 0.0,
            trades: 0,
            wins: 0,
            losses: 0,
            results: Vec::new(),
            trades_list: Vec::new(),
        }
    }

    /// Break-even trades count toward neither wins nor losses here.
    fn add(&mut self, trade: &Trade) {
        self.pnl += trade.pnl;
        self.trades += 1;
        if trade.pnl > 0.0 {
            self.wins += 1;
        } else if trade.pnl < 0.0 {
            self.losses += 1;
        }
        self.results.push(trade.pnl);
        self.trades_list.push(trade.clone());
    }
}

/// Buckets the trades of `month` by day of month. Keys are the day number
/// without a leading zero; days with no trades have no entry. Trades whose
/// date does not parse are skipped.
pub fn bucket_month(
    trades: &[Trade],
    month: YearMonth,
    filter: &DateRange,
) -> HashMap<String, DailyStats> {
    let mut buckets: HashMap<String, DailyStats> = HashMap::new();

    for trade in filter.apply(trades).iter() {
        let parts = match DateParts::parse(&trade.date) {
            Some(p) => p,
            None => continue,
        };
        if !month.matches(&parts) {
            continue;
        }

        buckets
            .entry(parts.day.to_string())
            .or_insert_with(|| DailyStats::empty(&trade.date))
            .add(trade);
    }

    buckets
}

/// Day numbers laid out on the 42-cell month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub offset: u32,
    pub days_in_month: u32,
    cells: Vec<Option<u32>>,
}

impl MonthGrid {
    pub fn new(month: YearMonth) -> Self {
        let offset = month.first_weekday_offset();
        let days_in_month = month.days_in_month();

        let cells = (0..GRID_CELLS as i64)
            .map(|i| {
                let day = i - offset as i64 + 1;
                if day > 0 && day <= days_in_month as i64 {
                    Some(day as u32)
                } else {
                    None
                }
            })
            .collect();

        Self {
            month,
            offset,
            days_in_month,
            cells,
        }
    }

    pub fn cell(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied().flatten()
    }

    pub fn cells(&self) -> &[Option<u32>] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthSummary {
    pub pnl: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
}

/// Per-month totals across the whole collection, classified like the
/// calendar days.
pub fn monthly_rollup(trades: &[Trade]) -> BTreeMap<YearMonth, MonthSummary> {
    let mut out: BTreeMap<YearMonth, MonthSummary> = BTreeMap::new();

    for trade in trades {
        let month = DateParts::parse(&trade.date).and_then(|p| {
            let month0 = u32::try_from(p.month0).ok()?;
            YearMonth::new(p.year, month0)
        });
        let Some(month) = month else { continue };

        let entry = out.entry(month).or_default();
        entry.pnl += trade.pnl;
        entry.trades += 1;
        if trade.pnl > 0.0 {
            entry.wins += 1;
        } else if trade.pnl < 0.0 {
            entry.losses += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_trade, october_trades};

    fn october() -> YearMonth {
        YearMonth::new(2023, 9).unwrap()
    }

    #[test]
    fn october_example_day_two() {
        let buckets = bucket_month(&october_trades(), october(), &DateRange::default());
        assert_eq!(buckets.len(), 2);

        let day = &buckets["2"];
        assert!((day.pnl - 300.0).abs() < 1e-9);
        assert_eq!(day.trades, 2);
        assert_eq!(day.wins, 1);
        assert_eq!(day.losses, 1);
        assert_eq!(day.results, vec![500.0, -200.0]);
        assert_eq!(day.trades_list.len(), 2);
        assert_eq!(day.date, "2023-10-02");
        assert!(buckets.contains_key("4"));
        assert!(!buckets.contains_key("02"));
    }

    #[test]
    fn break_even_is_neither_win_nor_loss() {
        let trades = vec![make_trade("1", "2023-10-09", 0.0)];
        let buckets = bucket_month(&trades, october(), &DateRange::default());
        let day = &buckets["9"];
        assert_eq!(day.trades, 1);
        assert_eq!(day.wins, 0);
        assert_eq!(day.losses, 0);
    }

    #[test]
    fn other_months_and_malformed_dates_are_skipped() {
        let trades = vec![
            make_trade("1", "2023-10-15", 10.0),
            make_trade("2", "2023-11-15", 20.0),
            make_trade("3", "2022-10-15", 30.0),
            make_trade("4", "15/10/2023", 40.0),
            make_trade("5", "2023-10", 50.0),
            make_trade("6", "2023-10-15T09:30", 60.0),
        ];
        let buckets = bucket_month(&trades, october(), &DateRange::default());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets["15"].trades, 1);
        assert!((buckets["15"].pnl - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bucket_totals_match_month_trades() {
        let trades = vec![
            make_trade("1", "2023-10-01", 12.5),
            make_trade("2", "2023-10-01", -2.5),
            make_trade("3", "2023-10-20", 7.0),
            make_trade("4", "2023-10-31", -1.0),
            make_trade("5", "2023-09-30", 99.0),
        ];
        let buckets = bucket_month(&trades, october(), &DateRange::default());
        let pnl: f64 = buckets.values().map(|d| d.pnl).sum();
        let count: usize = buckets.values().map(|d| d.trades).sum();
        assert!((pnl - 16.0).abs() < 1e-9);
        assert_eq!(count, 4);
    }

    #[test]
    fn filter_runs_before_bucketing() {
        let trades = october_trades();
        let range = DateRange::new("2023-10-03", "2023-10-31");
        let buckets = bucket_month(&trades, october(), &range);
        assert_eq!(buckets.len(), 1);
        assert!(buckets.contains_key("4"));
    }

    #[test]
    fn grid_january_2024_starts_monday() {
        let grid = MonthGrid::new(YearMonth::new(2024, 0).unwrap());
        assert_eq!(grid.offset, 0);
        assert_eq!(grid.cell(0), Some(1));
        assert_eq!(grid.cell(30), Some(31));
        assert_eq!(grid.cell(31), None);
        assert_eq!(grid.cells().len(), GRID_CELLS);
    }

    #[test]
    fn grid_month_starting_sunday() {
        // 1 October 2023 was a Sunday
        let grid = MonthGrid::new(october());
        assert_eq!(grid.offset, 6);
        assert_eq!(grid.cell(5), None);
        assert_eq!(grid.cell(6), Some(1));
        assert_eq!(grid.cell(36), Some(31));
        assert_eq!(grid.cell(37), None);
        assert_eq!(grid.rows().count(), 6);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 1).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 1).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2023, 11).unwrap().days_in_month(), 31);
    }

    #[test]
    fn navigation_wraps_years() {
        let jan = YearMonth::new(2024, 0).unwrap();
        assert_eq!(jan.prev(), YearMonth::new(2023, 11).unwrap());
        assert_eq!(jan.prev().next(), jan);
        assert!(YearMonth::new(2024, 12).is_none());
    }

    #[test]
    fn parse_and_display() {
        let ym = YearMonth::parse("2023-10").unwrap();
        assert_eq!(ym, october());
        assert_eq!(ym.to_string(), "2023-10");
        assert_eq!(ym.name(), "October");
        assert!(YearMonth::parse("2023-00").is_none());
        assert!(YearMonth::parse("2023").is_none());
    }

    #[test]
    fn deserialize_rejects_out_of_range_month() {
        let bad = serde_json::from_str::<YearMonth>(r#"{"year":2024,"month0":12}"#);
        assert!(bad.is_err());

        let ok: YearMonth = serde_json::from_str(r#"{"year":2024,"month0":11}"#).unwrap();
        assert_eq!(ok.name(), "December");
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"year":2024,"month0":11}"#);
    }

    #[test]
    fn monthly_rollup_groups_by_month() {
        let mut trades = october_trades();
        trades.push(make_trade("x", "2023-11-01", 0.0));
        trades.push(make_trade("y", "bad-date", 10.0));
        let rollup = monthly_rollup(&trades);
        assert_eq!(rollup.len(), 2);
        let oct = rollup[&october()];
        assert_eq!(oct.trades, 3);
        assert!((oct.pnl - 1300.0).abs() < 1e-9);
        let nov = rollup[&october().next()];
        assert_eq!((nov.wins, nov.losses), (0, 0));
    }
}
