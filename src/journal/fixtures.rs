use crate::models::{MarketType, Trade, TradeType};

#[allow(clippy::too_many_arguments)]
fn demo(
    id: &str,
    date: &str,
    symbol: &str,
    trade_type: TradeType,
    entry_price: f64,
    exit_price: f64,
    quantity: f64,
    pnl: f64,
    fees: f64,
    setup: &str,
    notes: &str,
) -> Trade {
    Trade {
        id: id.to_string(),
        date: date.to_string(),
        symbol: symbol.to_string(),
        trade_type,
        market_type: MarketType::Spot,
        entry_price,
        exit_price,
        quantity,
        leverage: None,
        contract_size: None,
        pnl,
        fees,
        setup: setup.to_string(),
        notes: notes.to_string(),
        image_url: None,
        ai_analysis: None,
    }
}

/// Demonstration journal written to an empty store on first load. The
/// stored `pnl` values are taken as given.
pub fn demo_trades() -> Vec<Trade> {
    use TradeType::{Long, Short};

    vec![
        demo(
            "1",
            "2023-10-02",
            "BTCUSD",
            Long,
            28000.0,
            28500.0,
            1.0,
            500.0,
            5.0,
            "Breakout",
            "Clean break of resistance.",
        ),
        demo(
            "2",
            "2023-10-02",
            "ETHUSD",
            Short,
            1600.0,
            1620.0,
            10.0,
            -200.0,
            10.0,
            "Rejection",
            "Stopped out quickly.",
        ),
        demo(
            "3",
            "2023-10-04",
            "TSLA",
            Long,
            240.0,
            250.0,
            100.0,
            1000.0,
            10.0,
            "Gap Fill",
            "Nice morning drive.",
        ),
        demo(
            "4",
            "2023-10-05",
            "NVDA",
            Long,
            450.0,
            455.0,
            50.0,
            250.0,
            5.0,
            "Trend Follow",
            "Slow grinder.",
        ),
        demo(
            "5",
            "2023-10-10",
            "ES_F",
            Short,
            4400.0,
            4380.0,
            2.0,
            2000.0,
            5.0,
            "Breakdown",
            "Heavy selling pressure.",
        ),
        demo(
            "6",
            "2023-10-12",
            "AAPL",
            Short,
            175.0,
            176.0,
            100.0,
            -100.0,
            2.0,
            "Rejection",
            "Fakeout.",
        ),
    ]
}
