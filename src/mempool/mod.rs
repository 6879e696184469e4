pub mod cache;
pub mod client;
pub mod error;

pub use cache::TtlCache;
pub use client::MempoolClient;
pub use error::MempoolError;

pub const DEFAULT_API_URL: &str = "https://mempool.space";
