use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::journal::fixtures::demo_trades;
use crate::models::Trade;

/// Storage for the trade collection. Backends provide raw load/store;
/// the journal operations on top are shared. Every mutation writes the
/// whole collection back (last write wins).
pub trait TradeRepository {
    /// `None` when nothing has ever been stored.
    fn load(&self) -> Result<Option<Vec<Trade>>>;
    fn store(&mut self, trades: &[Trade]) -> Result<()>;
    /// Forget the stored collection entirely.
    fn wipe(&mut self) -> Result<()>;

    /// The stored trades. A store that has never been written is seeded
    /// with the demonstration journal first.
    fn list(&mut self) -> Result<Vec<Trade>> {
        match self.load()? {
            Some(trades) => Ok(trades),
            None => {
                let seed = demo_trades();
                info!("Seeding empty journal with {} demo trades", seed.len());
                self.store(&seed)?;
                Ok(seed)
            }
        }
    }

    /// Replaces the trade with the same id in place, or appends it.
    fn upsert(&mut self, trade: Trade) -> Result<Vec<Trade>> {
        let mut trades = self.list()?;
        match trades.iter().position(|t| t.id == trade.id) {
            Some(idx) => {
                debug!("Updating trade {}", trade.id);
                trades[idx] = trade;
            }
            None => {
                debug!("Adding trade {}", trade.id);
                trades.push(trade);
            }
        }
        self.store(&trades)?;
        Ok(trades)
    }

    fn remove(&mut self, id: &str) -> Result<Vec<Trade>> {
        let mut trades = self.list()?;
        trades.retain(|t| t.id != id);
        self.store(&trades)?;
        Ok(trades)
    }

    fn get(&mut self, id: &str) -> Result<Option<Trade>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    fn clear(&mut self) -> Result<()> {
        info!("Clearing journal");
        self.wipe()
    }
}

/// Trades kept as one pretty-printed JSON array on disk.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<Trade>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let trades: Vec<Trade> = serde_json::from_str(&content)?;
        debug!("Loaded {} trades from {}", trades.len(), self.path.display());
        Ok(Some(trades))
    }

    fn store(&mut self, trades: &[Trade]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(trades)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} trades to {}", trades.len(), self.path.display());
        Ok(())
    }

    fn wipe(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    trades: Option<Vec<Trade>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `trades`, so no seeding happens.
    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self {
            trades: Some(trades),
        }
    }
}

impl TradeRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Vec<Trade>>> {
        Ok(self.trades.clone())
    }

    fn store(&mut self, trades: &[Trade]) -> Result<()> {
        self.trades = Some(trades.to_vec());
        Ok(())
    }

    fn wipe(&mut self) -> Result<()> {
        self.trades = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::test_helpers::{make_trade, temp_path};

    #[test]
    fn first_list_seeds_demo_data() {
        let mut repo = MemoryRepository::new();
        let trades = repo.list().unwrap();
        assert_eq!(trades.len(), 6);
        assert_eq!(trades[0].id, "1");
        // persisted, so a second list returns the same data
        assert_eq!(repo.load().unwrap().unwrap().len(), 6);
    }

    #[test]
    fn stored_empty_collection_is_not_reseeded() {
        let mut repo = MemoryRepository::with_trades(Vec::new());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut repo = MemoryRepository::with_trades(vec![
            make_trade("a", "2024-01-01", 1.0),
            make_trade("b", "2024-01-02", 2.0),
            make_trade("c", "2024-01-03", 3.0),
        ]);
        let trades = repo.upsert(make_trade("b", "2024-01-09", 20.0)).unwrap();
        let ids: Vec<&str> = trades.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!((trades[1].pnl - 20.0).abs() < 1e-9);
        assert_eq!(trades[1].date, "2024-01-09");
    }

    #[test]
    fn upsert_appends_unknown_id() {
        let mut repo = MemoryRepository::with_trades(vec![make_trade("a", "2024-01-01", 1.0)]);
        let trades = repo.upsert(make_trade("z", "2024-01-05", 5.0)).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[1].id, "z");
    }

    #[test]
    fn remove_filters_by_id() {
        let mut repo = MemoryRepository::with_trades(vec![
            make_trade("a", "2024-01-01", 1.0),
            make_trade("b", "2024-01-02", 2.0),
        ]);
        let trades = repo.remove("a").unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].id, "b");
        // unknown id is a no-op
        assert_eq!(repo.remove("nope").unwrap().len(), 1);
    }

    #[test]
    fn clear_then_list_reseeds() {
        let mut repo = MemoryRepository::with_trades(vec![make_trade("a", "2024-01-01", 1.0)]);
        repo.clear().unwrap();
        assert_eq!(repo.list().unwrap().len(), 6);
    }

    #[test]
    fn json_file_persists_across_instances() {
        let path = temp_path("json_file_persists");
        let _ = fs::remove_file(&path);

        let mut repo = JsonFileRepository::new(&path);
        assert!(repo.load().unwrap().is_none());
        repo.upsert(make_trade("new", "2024-02-02", 42.0)).unwrap();

        let mut reopened = JsonFileRepository::new(&path);
        let trades = reopened.list().unwrap();
        assert_eq!(trades.len(), 7);
        assert_eq!(reopened.get("new").unwrap().unwrap().pnl, 42.0);

        reopened.clear().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let path = temp_path("corrupt_file");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let mut repo = JsonFileRepository::new(&path);
        assert!(matches!(repo.list(), Err(JournalError::Serialization(_))));
        let _ = fs::remove_file(&path);
    }
}
