use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};

use crate::journal::calendar::{monthly_rollup, DailyStats, MonthGrid, MonthSummary, YearMonth};
use crate::journal::equity::{equity_curve, EquityPoint};
use crate::journal::sparkline::sparkline_path;
use crate::journal::stats::DashboardStats;
use crate::models::{data_url_size, Trade};

const RULE: &str = "  ───────────────────────────────────";

#[derive(Debug, Clone)]
pub struct JournalReport {
    pub stats: DashboardStats,
    pub equity_curve: Vec<EquityPoint>,
    pub monthly: BTreeMap<YearMonth, MonthSummary>,
}

impl JournalReport {
    pub fn from_trades(trades: &[Trade]) -> Self {
        Self {
            stats: DashboardStats::from_trades(trades),
            equity_curve: equity_curve(trades),
            monthly: monthly_rollup(trades),
        }
    }
}

impl fmt::Display for JournalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;

        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "  TRADING JOURNAL")?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "  PERFORMANCE")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "  Net P&L:       ${:+.2}", s.total_pnl)?;
        writeln!(f, "  Trades:        {}", s.total_trades)?;
        writeln!(f, "  Win Rate:      {:.1}%", s.win_rate)?;
        writeln!(f, "  Profit Factor: {:.2}", s.profit_factor)?;
        writeln!(f, "  Avg Win:       ${:.2}", s.avg_win)?;
        writeln!(f, "  Avg Loss:      ${:.2}", s.avg_loss)?;
        writeln!(f, "  Best Trade:    ${:.2}", s.best_day)?;

        if !self.monthly.is_empty() {
            writeln!(f)?;
            writeln!(f, "  BY MONTH")?;
            writeln!(f, "{}", RULE)?;
            for (month, m) in &self.monthly {
                writeln!(
                    f,
                    "  {}: {} trades | {}W / {}L | P&L ${:+.2}",
                    month, m.trades, m.wins, m.losses, m.pnl
                )?;
            }
        }

        if !self.equity_curve.is_empty() {
            writeln!(f)?;
            writeln!(f, "  EQUITY CURVE")?;
            writeln!(f, "{}", RULE)?;
            for p in &self.equity_curve {
                writeln!(f, "  #{:<3} {}  ${:+.2}", p.index, p.date, p.balance)?;
            }
        }

        writeln!(f, "{}", "=".repeat(60))
    }
}

/// Month grid, one cell per day: day number and that day's net P&L.
pub fn render_calendar(
    month: YearMonth,
    buckets: &HashMap<String, DailyStats>,
) -> Result<String, fmt::Error> {
    let grid = MonthGrid::new(month);
    let mut out = String::new();

    writeln!(out, "  {} {}", month.name(), month.year())?;
    writeln!(
        out,
        "  {}",
        ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
            .iter()
            .map(|d| format!("{:<11}", d))
            .collect::<String>()
            .trim_end()
    )?;

    for row in grid.rows() {
        if row.iter().all(Option::is_none) {
            continue;
        }
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(day) => match buckets.get(&day.to_string()) {
                    Some(stats) => format!("{:>2} {:<+8.0}", day, stats.pnl),
                    None => format!("{:>2}{:9}", day, ""),
                },
                None => " ".repeat(11),
            })
            .collect();
        writeln!(out, "  {}", line.trim_end())?;
    }

    let month_pnl: f64 = buckets.values().map(|d| d.pnl).sum();
    let month_trades: usize = buckets.values().map(|d| d.trades).sum();
    writeln!(out, "  Month: {} trades | P&L ${:+.2}", month_trades, month_pnl)?;
    Ok(out)
}

/// Detail for a single day: totals, sparkline path and each trade.
pub fn render_day(stats: &DailyStats) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "  {}: {} trades | {}W / {}L | P&L ${:+.2}",
        stats.date, stats.trades, stats.wins, stats.losses, stats.pnl
    )?;
    writeln!(out, "  sparkline: {}", sparkline_path(&stats.results))?;
    for t in &stats.trades_list {
        writeln!(
            out,
            "    {} {:<5} {:<8} {:>10} -> {:<10} ${:+.2}  [{}]",
            t.id, t.trade_type, t.symbol, t.entry_price, t.exit_price, t.pnl, t.setup
        )?;
    }
    Ok(out)
}

/// Trade log in stored order. The data column flags notes (`N`), an
/// attached chart (`I`) and a saved critique (`AI`).
pub fn render_journal(trades: &[Trade]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "  {:<10}  {:<8}  {:<5}  {:<14}  {:>10}  {:>10}  {:>8}  {:>10}  {:<6}  ID",
        "Date", "Symbol", "Type", "Setup", "Entry", "Exit", "Size", "P&L", "Data"
    )?;
    writeln!(out, "{}", RULE)?;

    if trades.is_empty() {
        writeln!(out, "  No trades recorded yet.")?;
        return Ok(out);
    }

    for t in trades {
        let mut data = String::new();
        if !t.notes.is_empty() {
            data.push('N');
        }
        if t.image_url.is_some() {
            data.push('I');
        }
        if t.ai_analysis.is_some() {
            data.push_str("AI");
        }
        writeln!(
            out,
            "  {:<10}  {:<8}  {:<5}  {:<14}  {:>10}  {:>10}  {:>8}  {:>+10.2}  {:<6}  {}",
            t.date,
            t.symbol,
            t.trade_type,
            t.setup,
            t.entry_price,
            t.exit_price,
            t.quantity,
            t.pnl,
            data,
            t.id
        )?;
    }
    writeln!(out, "  {} trades", trades.len())?;
    Ok(out)
}

/// Full detail for one trade: prices, notes, chart and critique.
pub fn render_trade(trade: &Trade) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "  {} {} ({})", trade.symbol, trade.trade_type, trade.market_type)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  Id:        {}", trade.id)?;
    writeln!(out, "  Date:      {}", trade.date)?;
    writeln!(out, "  Setup:     {}", trade.setup)?;
    writeln!(out, "  Entry:     {}", trade.entry_price)?;
    writeln!(out, "  Exit:      {}", trade.exit_price)?;
    writeln!(out, "  Size:      {}", trade.quantity)?;
    if let Some(leverage) = trade.leverage {
        writeln!(out, "  Leverage:  {}x", leverage)?;
    }
    if let Some(contract_size) = trade.contract_size {
        writeln!(out, "  Contract:  {}", contract_size)?;
    }
    writeln!(out, "  Fees:      ${:.2}", trade.fees)?;
    writeln!(out, "  P&L:       ${:+.2}", trade.pnl)?;

    writeln!(out)?;
    writeln!(out, "  NOTES")?;
    if trade.notes.is_empty() {
        writeln!(out, "  (none)")?;
    } else {
        writeln!(out, "  {}", trade.notes)?;
    }

    match trade.image_url.as_deref() {
        Some(url) => match data_url_size(url) {
            Some(bytes) => writeln!(out, "  Chart:     attached ({} bytes)", bytes)?,
            None => writeln!(out, "  Chart:     {}", url)?,
        },
        None => writeln!(out, "  Chart:     none")?,
    }

    if let Some(analysis) = &trade.ai_analysis {
        writeln!(out)?;
        writeln!(out, "  AI MENTOR")?;
        writeln!(out, "  {}", analysis)?;
    }
    Ok(out)
}
