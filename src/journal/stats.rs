use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// Whole-collection summary shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_pnl: f64,
    /// Percent, 0..=100.
    pub win_rate: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub total_trades: usize,
    /// Largest single-trade P&L, floored at 0. Despite the name this is a
    /// per-trade maximum, not a per-calendar-day one.
    pub best_day: f64,
}

impl DashboardStats {
    /// Here a trade is a win iff `pnl > 0` and a loss otherwise, so
    /// break-even trades count as losses. The calendar classifies them
    /// as neither.
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        if total_trades == 0 {
            return Self::default();
        }

        let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();

        let wins = trades.iter().filter(|t| t.pnl > 0.0).count();
        let losses = total_trades - wins;

        let win_rate = wins as f64 / total_trades as f64 * 100.0;

        let (gross_profit, gross_loss) = Self::gross(trades);

        // No losses: report raw profit instead of an infinite ratio.
        let profit_factor = if gross_loss == 0.0 {
            gross_profit
        } else {
            gross_profit / gross_loss
        };

        let avg_win = if wins == 0 {
            0.0
        } else {
            gross_profit / wins as f64
        };
        let avg_loss = if losses == 0 {
            0.0
        } else {
            gross_loss / losses as f64
        };

        let best_day = trades.iter().map(|t| t.pnl).fold(0.0, f64::max);

        DashboardStats {
            total_pnl,
            win_rate,
            profit_factor,
            avg_win,
            avg_loss,
            total_trades,
            best_day,
        }
    }

    /// Gross profit and gross loss magnitude behind `profit_factor`.
    pub fn gross(trades: &[Trade]) -> (f64, f64) {
        let profit = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
        let loss = trades
            .iter()
            .filter(|t| t.pnl <= 0.0)
            .map(|t| t.pnl)
            .sum::<f64>()
            .abs();
        (profit, loss)
    }
}
