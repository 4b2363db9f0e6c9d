pub mod attachment;
pub mod direction;
pub mod trade;

pub use attachment::{data_url_size, image_data_url};
pub use direction::*;
pub use trade::{compute_pnl, with_analysis, DateParts, Trade, TradeDraft};
