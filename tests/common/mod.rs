use std::path::PathBuf;

use trade_journal::models::{MarketType, Trade, TradeType};

/// A trade where only id, date and P&L matter.
pub fn trade(id: &str, date: &str, pnl: f64) -> Trade {
    Trade {
        id: id.to_string(),
        date: date.to_string(),
        symbol: "ES_F".to_string(),
        trade_type: TradeType::Short,
        market_type: MarketType::Future,
        entry_price: 4400.0,
        exit_price: 4390.0,
        quantity: 1.0,
        leverage: Some(10.0),
        contract_size: Some(50.0),
        pnl,
        fees: 0.0,
        setup: "Breakdown".to_string(),
        notes: String::new(),
        image_url: None,
        ai_analysis: None,
    }
}

/// Fresh store path for one test; any previous file is removed.
pub fn store_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("trade_journal_integ_{}", std::process::id()))
        .join(format!("{}.json", name));
    let _ = std::fs::remove_file(&path);
    path
}
