use std::path::PathBuf;

use crate::config::Config;
use crate::models::{MarketType, Trade, TradeType};

/// A trade where only id, date and P&L matter.
pub fn make_trade(id: &str, date: &str, pnl: f64) -> Trade {
    Trade {
        id: id.to_string(),
        date: date.to_string(),
        symbol: "BTCUSD".to_string(),
        trade_type: TradeType::Long,
        market_type: MarketType::Spot,
        entry_price: 100.0,
        exit_price: 100.0,
        quantity: 1.0,
        leverage: None,
        contract_size: None,
        pnl,
        fees: 0.0,
        setup: String::new(),
        notes: String::new(),
        image_url: None,
        ai_analysis: None,
    }
}

/// 2 Oct: +500, -200; 4 Oct: +1000.
pub fn october_trades() -> Vec<Trade> {
    vec![
        make_trade("1", "2023-10-02", 500.0),
        make_trade("2", "2023-10-02", -200.0),
        make_trade("3", "2023-10-04", 1000.0),
    ]
}

/// Unique per process and test name so parallel tests don't collide.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("trade_journal_test_{}", std::process::id()))
        .join(format!("{}.json", name))
}

/// No API key, data under a temp dir.
pub fn default_test_config() -> Config {
    Config {
        data_dir: std::env::temp_dir()
            .join(format!("trade_journal_test_{}", std::process::id()))
            .to_string_lossy()
            .to_string(),
        store_file: "trades.json".to_string(),
        gemini_api_key: String::new(),
        gemini_model: "gemini-2.5-flash".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        ai_timeout_secs: 2,
        log_level: "debug".to_string(),
    }
}
