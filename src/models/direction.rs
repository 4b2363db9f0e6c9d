use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    #[default]
    Long,
    Short,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Long => "LONG",
            TradeType::Short => "SHORT",
        }
    }

    /// +1 for longs, -1 for shorts.
    pub fn sign(self) -> f64 {
        match self {
            TradeType::Long => 1.0,
            TradeType::Short => -1.0,
        }
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LONG" => Ok(TradeType::Long),
            "SHORT" => Ok(TradeType::Short),
            other => Err(format!("unknown trade type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketType {
    #[default]
    Spot,
    Future,
    FxCfd,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "SPOT",
            MarketType::Future => "FUTURE",
            MarketType::FxCfd => "FX_CFD",
        }
    }
}

impl FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SPOT" => Ok(MarketType::Spot),
            "FUTURE" => Ok(MarketType::Future),
            "FX_CFD" => Ok(MarketType::FxCfd),
            other => Err(format!("unknown market type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_upper_case() {
        assert_eq!(serde_json::to_string(&TradeType::Short).unwrap(), "\"SHORT\"");
        assert_eq!(serde_json::to_string(&MarketType::FxCfd).unwrap(), "\"FX_CFD\"");
        // table columns rely on width padding
        assert_eq!(format!("{:<6}|", TradeType::Long), "LONG  |");
        let t: MarketType = serde_json::from_str("\"FUTURE\"").unwrap();
        assert_eq!(t, MarketType::Future);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("long".parse::<TradeType>().unwrap(), TradeType::Long);
        assert_eq!("fx_cfd".parse::<MarketType>().unwrap(), MarketType::FxCfd);
        assert!("sideways".parse::<TradeType>().is_err());
    }
}
