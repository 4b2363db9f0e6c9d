use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{JournalError, Result};
use crate::models::direction::{MarketType, TradeType};

/// A recorded, closed trade. Field names on the wire match the journal's
/// stored JSON (`entryPrice`, `aiAnalysis`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(default)]
    pub market_type: MarketType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_size: Option<f64>,
    /// Realized P&L, fixed when the trade was entered. Aggregation never
    /// recomputes it from prices.
    pub pnl: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

/// `(exit - entry) * quantity * sign(type) - fees`
pub fn compute_pnl(
    trade_type: TradeType,
    entry_price: f64,
    exit_price: f64,
    quantity: f64,
    fees: f64,
) -> f64 {
    (exit_price - entry_price) * quantity * trade_type.sign() - fees
}

/// Year / month / day split out of a `YYYY-MM-DD` string without going
/// through any timezone-aware date type. `month0` is 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month0: i32,
    pub day: i32,
}

impl DateParts {
    /// Returns `None` unless the string splits on `-` into exactly three
    /// integer parts.
    pub fn parse(date: &str) -> Option<Self> {
        let parts: Vec<&str> = date.split('-').collect();
        if parts.len() != 3 {
            return None;
        }

        let year = parts[0].trim().parse::<i32>().ok()?;
        let month = parts[1].trim().parse::<i32>().ok()?;
        let day = parts[2].trim().parse::<i32>().ok()?;

        Some(Self {
            year,
            month0: month - 1,
            day,
        })
    }
}

/// Trade fields as entered, before an id is assigned and P&L is fixed.
/// Also serves as the "partial trade" handed to the critique service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDraft {
    pub date: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(default)]
    pub market_type: MarketType,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    #[serde(default)]
    pub leverage: Option<f64>,
    #[serde(default)]
    pub contract_size: Option<f64>,
    #[serde(default)]
    pub fees: f64,
    #[serde(default)]
    pub setup: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
}

impl Default for TradeDraft {
    fn default() -> Self {
        Self {
            date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            symbol: String::new(),
            trade_type: TradeType::Long,
            market_type: MarketType::Spot,
            entry_price: 0.0,
            exit_price: 0.0,
            quantity: 1.0,
            leverage: None,
            contract_size: None,
            fees: 0.0,
            setup: String::new(),
            notes: String::new(),
            image_url: None,
            ai_analysis: None,
        }
    }
}

impl TradeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trade(trade: &Trade) -> Self {
        Self {
            date: trade.date.clone(),
            symbol: trade.symbol.clone(),
            trade_type: trade.trade_type,
            market_type: trade.market_type,
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            quantity: trade.quantity,
            leverage: trade.leverage,
            contract_size: trade.contract_size,
            fees: trade.fees,
            setup: trade.setup.clone(),
            notes: trade.notes.clone(),
            image_url: trade.image_url.clone(),
            ai_analysis: trade.ai_analysis.clone(),
        }
    }

    pub fn pnl(&self) -> f64 {
        compute_pnl(
            self.trade_type,
            self.entry_price,
            self.exit_price,
            self.quantity,
            self.fees,
        )
    }

    /// Checks what the entry form enforces before saving.
    pub fn validate(&self) -> Result<()> {
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(JournalError::InvalidTrade(format!(
                "date must be YYYY-MM-DD, got {:?}",
                self.date
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(JournalError::InvalidTrade("symbol is required".to_string()));
        }
        let numbers = [self.entry_price, self.exit_price, self.quantity, self.fees];
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(JournalError::InvalidTrade(
                "prices, quantity and fees must be numbers".to_string(),
            ));
        }
        if self.quantity <= 0.0 {
            return Err(JournalError::InvalidTrade("quantity must be positive".to_string()));
        }
        Ok(())
    }

    /// Freeze the draft into a trade. Editing keeps `existing_id`; a new
    /// entry gets a fresh v4 UUID.
    pub fn into_trade(self, existing_id: Option<&str>) -> Trade {
        let pnl = self.pnl();
        let id = match existing_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        Trade {
            id,
            date: self.date,
            symbol: self.symbol,
            trade_type: self.trade_type,
            market_type: self.market_type,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            quantity: self.quantity,
            leverage: self.leverage,
            contract_size: self.contract_size,
            pnl,
            fees: self.fees,
            setup: self.setup,
            notes: self.notes,
            image_url: self.image_url,
            ai_analysis: self.ai_analysis.filter(|s| !s.is_empty()),
        }
    }
}

/// Copy of `trade` with the critique text attached.
pub fn with_analysis(trade: &Trade, analysis: impl Into<String>) -> Trade {
    Trade {
        ai_analysis: Some(analysis.into()),
        ..trade.clone()
    }
}
