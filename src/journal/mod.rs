pub mod calendar;
pub mod equity;
pub mod filter;
pub mod fixtures;
pub mod repository;
pub mod sparkline;
pub mod stats;
pub mod view;

pub use calendar::{bucket_month, monthly_rollup, DailyStats, MonthGrid, MonthSummary, YearMonth};
pub use equity::{equity_curve, EquityPoint};
pub use filter::DateRange;
pub use repository::{JsonFileRepository, MemoryRepository, TradeRepository};
pub use sparkline::{sparkline_path, sparkline_points};
pub use stats::DashboardStats;
pub use view::CalendarView;
