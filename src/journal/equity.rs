use serde::{Deserialize, Serialize};

use crate::models::Trade;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 1-based position in date order.
    pub index: usize,
    pub date: String,
    pub balance: f64,
}

/// Running P&L balance in date order. Trades sharing a date keep their
/// collection order; dates compare as fixed-width strings.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut running_balance = 0.0;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            running_balance += t.pnl;
            EquityPoint {
                index: i + 1,
                date: t.date.clone(),
                balance: running_balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_trade, october_trades};

    #[test]
    fn empty_input_yields_empty_curve() {
        assert!(equity_curve(&[]).is_empty());
    }

    #[test]
    fn october_curve() {
        let curve = equity_curve(&october_trades());
        let balances: Vec<f64> = curve.iter().map(|p| p.balance).collect();
        assert_eq!(balances, vec![500.0, 300.0, 1300.0]);
        assert_eq!(curve[2].index, 3);
        assert_eq!(curve[2].date, "2023-10-04");
    }

    #[test]
    fn sorts_by_date_and_is_stable() {
        let trades = vec![
            make_trade("late", "2024-02-10", 5.0),
            make_trade("a", "2024-02-01", 1.0),
            make_trade("b", "2024-02-01", 2.0),
            make_trade("c", "2024-02-01", 3.0),
        ];
        let curve = equity_curve(&trades);
        let balances: Vec<f64> = curve.iter().map(|p| p.balance).collect();
        // a, b, c in insertion order, then the later trade
        assert_eq!(balances, vec![1.0, 3.0, 6.0, 11.0]);
        assert_eq!(curve[3].date, "2024-02-10");
    }

    #[test]
    fn final_point_equals_total_pnl() {
        let trades = vec![
            make_trade("1", "2024-01-03", 10.5),
            make_trade("2", "2023-12-29", -4.25),
            make_trade("3", "2024-01-01", 0.0),
        ];
        let total: f64 = trades.iter().map(|t| t.pnl).sum();
        let last = equity_curve(&trades).last().unwrap().balance;
        assert!((last - total).abs() < 1e-9);
    }
}
