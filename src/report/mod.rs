pub mod console;
pub mod filter;
pub mod stats;

pub use filter::{is_valid, partition};
pub use stats::{MarketSummary, OutlierReport};
