use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::Config;
use crate::mempool::{MempoolClient, TtlCache};
use crate::mining::{BlockStore, MinedBlock, PoolShare, PoolStatistic, Window};
use crate::pools::{PoolIdentity, PoolTable};

/// Shared application state: the pool table, in-memory block and share
/// stores, and the upstream client with its response caches.
pub struct AppState {
    pub pools: &'static PoolTable,
    pub blocks: Mutex<BlockStore>,
    pub shares: Mutex<HashMap<Window, Vec<PoolShare>>>,
    pub share_cache: Mutex<TtlCache<Window, Vec<PoolShare>>>,
    pub block_cache: Mutex<TtlCache<(), Vec<MinedBlock>>>,
    pub mempool: Option<MempoolClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let mempool = match MempoolClient::new(&config.mempool_api_url, config.request_timeout) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("mempool client disabled: {e}");
                None
            }
        };
        Self::with_client(config, mempool)
    }

    /// State with no upstream client; `/sync/` routes answer 503.
    pub fn offline(config: &Config) -> Self {
        Self::with_client(config, None)
    }

    fn with_client(config: &Config, mempool: Option<MempoolClient>) -> Self {
        Self {
            pools: PoolTable::builtin(),
            blocks: Mutex::new(BlockStore::new()),
            shares: Mutex::new(HashMap::new()),
            share_cache: Mutex::new(TtlCache::new(config.cache_ttl)),
            block_cache: Mutex::new(TtlCache::new(config.cache_ttl)),
            mempool,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::offline(&Config::default())
    }
}

/* ---------- Pools API Models ---------- */

#[derive(Serialize)]
pub struct PoolTableResponse {
    pub version: String,
    pub count: usize,
    pub pools: Vec<PoolIdentity>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub raw: String,
    pub key: String,
    #[serde(flatten)]
    pub identity: PoolIdentity,
}

/* ---------- Blocks API Models ---------- */

#[derive(Deserialize)]
pub struct BlocksQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct BlocksResponse {
    pub count: usize,
    pub tip_height: Option<u64>,
    pub blocks: Vec<MinedBlock>,
}

#[derive(Serialize)]
pub struct IngestResponse {
    pub received: usize,
    pub added: usize,
    pub stored: usize,
}

/* ---------- Shares API Models ---------- */

#[derive(Serialize)]
pub struct SharesResponse {
    pub window: Window,
    pub total_pct: f64,
    pub shares: Vec<PoolShare>,
}

/* ---------- Stats API Models ---------- */

#[derive(Serialize)]
pub struct PoolStatsResponse {
    pub window: Window,
    pub requested_blocks: usize,
    pub blocks_used: usize,
    pub table_version: String,
    pub pools: Vec<PoolStatistic>,
}

#[derive(Serialize)]
pub struct NextBlockResponse {
    pub tip_height: u64,
    pub tip_timestamp: i64,
    pub mean_interval_secs: f64,
    pub expected_at: i64,
    pub countdown_secs: i64,
    pub horizon_secs: i64,
    pub probability_within_horizon: f64,
}

/* ---------- Sync API Models ---------- */

#[derive(Serialize)]
pub struct SyncResponse {
    pub source: String,
    pub cached: bool,
    pub cache_ttl_secs: u64,
    pub received: usize,
    pub stored: usize,
}
