pub mod gemini;

pub use gemini::GeminiCritic;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::{Trade, TradeDraft, TradeType};

pub const MISSING_KEY_MESSAGE: &str = "API Key is missing. Please configure the environment.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to AI service.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Could not generate analysis.";

/// The fields of a trade the mentor gets to see.
#[derive(Debug, Clone, PartialEq)]
pub struct CritiqueRequest {
    pub symbol: String,
    pub trade_type: TradeType,
    pub pnl: f64,
    pub setup: String,
    pub notes: String,
}

impl CritiqueRequest {
    pub fn prompt(&self) -> String {
        format!(
            "You are a professional senior trading mentor. Analyze the following trade details and provide brief, constructive feedback in 2-3 sentences. Focus on the setup and outcome.\n\
             \n\
             Symbol: {}\n\
             Type: {}\n\
             Outcome P&L: ${}\n\
             Setup Strategy: {}\n\
             User Notes: {}\n\
             \n\
             If the user won, congratulate them but remind them of discipline. If they lost, provide psychological support or technical advice based on the notes.",
            self.symbol, self.trade_type, self.pnl, self.setup, self.notes
        )
    }
}

impl From<&Trade> for CritiqueRequest {
    fn from(t: &Trade) -> Self {
        Self {
            symbol: t.symbol.clone(),
            trade_type: t.trade_type,
            pnl: t.pnl,
            setup: t.setup.clone(),
            notes: t.notes.clone(),
        }
    }
}

impl From<&TradeDraft> for CritiqueRequest {
    fn from(d: &TradeDraft) -> Self {
        Self {
            symbol: d.symbol.clone(),
            trade_type: d.trade_type,
            pnl: d.pnl(),
            setup: d.setup.clone(),
            notes: d.notes.clone(),
        }
    }
}

/// Produces advisory text for a trade. Never fails: problems come back as
/// a readable fallback sentence.
#[async_trait]
pub trait Critic: Send + Sync {
    async fn critique(&self, request: &CritiqueRequest) -> String;
}

/// A critique running in the background.
pub struct CritiqueTask {
    rx: oneshot::Receiver<String>,
    handle: JoinHandle<()>,
}

impl CritiqueTask {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// The critique text, or `None` if the task was cancelled.
    pub async fn wait(self) -> Option<String> {
        self.rx.await.ok()
    }
}

/// Runs the critique on its own tokio task. Must be called inside a
/// runtime.
pub fn spawn_critique(critic: Arc<dyn Critic>, request: CritiqueRequest) -> CritiqueTask {
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let text = critic.critique(&request).await;
        if tx.send(text).is_err() {
            debug!("Critique for {} finished after receiver dropped", request.symbol);
        }
    });
    CritiqueTask { rx, handle }
}
