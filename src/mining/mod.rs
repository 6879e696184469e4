pub mod estimate;
pub mod luck;
pub mod model;
pub mod store;

pub use luck::{canonical_shares, compute_stats};
pub use model::{MinedBlock, PoolShare, PoolStatistic, Window};
pub use store::BlockStore;

/// Bitcoin's target seconds per block.
pub const TARGET_BLOCK_TIME_SECS: i64 = 600;

/// Largest trailing window the stats endpoint accepts (one retarget period).
pub const MAX_STATS_BLOCKS: usize = 2016;

/// Blocks returned by `/blocks/` when no limit is given.
pub const DEFAULT_BLOCK_LIMIT: usize = 15;

/// Horizon used for the "next block within" probability.
pub const NEXT_BLOCK_HORIZON_SECS: i64 = 600;

/// Trailing blocks averaged for the next-block estimate (about one day).
pub const ESTIMATE_WINDOW: usize = 144;
