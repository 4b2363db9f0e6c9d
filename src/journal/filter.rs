use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::models::Trade;

/// Inclusive `[from, to]` range over `YYYY-MM-DD` strings. Only applied
/// when both ends are set; `from > to` simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    fn bounds(&self) -> Option<(&str, &str)> {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) if !from.is_empty() && !to.is_empty() => Some((from, to)),
            _ => None,
        }
    }

    pub fn contains(&self, date: &str) -> bool {
        match self.bounds() {
            Some((from, to)) => date >= from && date <= to,
            None => true,
        }
    }

    /// The filtered collection, or the input untouched when the range is
    /// incomplete.
    pub fn apply<'a>(&self, trades: &'a [Trade]) -> Cow<'a, [Trade]> {
        if !self.is_active() {
            return Cow::Borrowed(trades);
        }
        Cow::Owned(
            trades
                .iter()
                .filter(|t| self.contains(&t.date))
                .cloned()
                .collect(),
        )
    }

    pub fn clear(&mut self) {
        self.from = None;
        self.to = None;
    }
}
