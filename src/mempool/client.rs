use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::MempoolError;
use crate::mining::{MinedBlock, PoolShare, Window, canonical_shares};
use crate::pools::{PoolTable, UNKNOWN_SLUG};

/* ---------- Upstream payloads (only the fields we read) ---------- */

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolsResponse {
    pub pools: Vec<UpstreamPool>,
    #[serde(default)]
    pub block_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPool {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub block_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamBlock {
    pub height: u64,
    pub timestamp: i64,
    #[serde(default)]
    pub extras: Option<BlockExtras>,
}

#[derive(Debug, Deserialize)]
pub struct BlockExtras {
    #[serde(default)]
    pub pool: Option<UpstreamPoolRef>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamPoolRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Client for the mempool.space REST API.
#[derive(Debug, Clone)]
pub struct MempoolClient {
    http: reqwest::Client,
    base_url: String,
}

impl MempoolClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, MempoolError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .pool_idle_timeout(Duration::from_secs(300))
            .pool_max_idle_per_host(1)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MempoolError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("MEMPOOL - GET {url}");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(MempoolError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(resp.json::<T>().await?)
    }

    /// Canonical hashrate shares for `window`, derived from block counts.
    pub async fn pool_shares(&self, window: Window) -> Result<Vec<PoolShare>, MempoolError> {
        let resp: PoolsResponse = self
            .get_json(&format!("/api/v1/mining/pools/{window}"))
            .await?;
        shares_from_response(PoolTable::builtin(), &resp)
    }

    /// The latest blocks the provider knows about, ascending by height.
    pub async fn recent_blocks(&self) -> Result<Vec<MinedBlock>, MempoolError> {
        let resp: Vec<UpstreamBlock> = self.get_json("/api/v1/blocks").await?;
        Ok(blocks_from_response(PoolTable::builtin(), resp))
    }
}

/// Which upstream field names the pool: the slug when it resolves to a
/// known pool, else the display name when that does, else whichever is set.
/// Shares and blocks both go through here so they land on the same pool.
fn pool_label(table: &PoolTable, slug: Option<String>, name: Option<String>) -> Option<String> {
    let known = |raw: &Option<String>| table.resolve(raw.as_deref()).slug != UNKNOWN_SLUG;
    if known(&slug) {
        slug
    } else if known(&name) {
        name
    } else {
        slug.or(name)
    }
}

/// Turn per-pool block counts into canonical percentage shares; rows
/// landing on the same canonical pool are merged. An empty pool list is
/// rejected so a bad upstream answer never wipes stored shares.
pub fn shares_from_response(
    table: &PoolTable,
    resp: &PoolsResponse,
) -> Result<Vec<PoolShare>, MempoolError> {
    if resp.pools.is_empty() {
        return Err(MempoolError::InvalidData("upstream returned no pools".into()));
    }
    let total = match resp.block_count {
        0 => resp.pools.iter().map(|p| p.block_count).sum(),
        n => n,
    };
    if total == 0 {
        return Err(MempoolError::InvalidData(
            "pool block counts sum to zero".into(),
        ));
    }

    let shares: Vec<PoolShare> = resp
        .pools
        .iter()
        .map(|pool| {
            let label = pool_label(table, pool.slug.clone(), pool.name.clone());
            let slug = table.resolve(label.as_deref()).slug;
            PoolShare::new(slug, pool.block_count as f64 * 100.0 / total as f64)
        })
        .collect();
    Ok(canonical_shares(table, &shares))
}

/// Keep a raw pool label per block (see [`pool_label`]); resolution happens
/// when statistics are computed.
pub fn blocks_from_response(table: &PoolTable, resp: Vec<UpstreamBlock>) -> Vec<MinedBlock> {
    let mut blocks: Vec<MinedBlock> = resp
        .into_iter()
        .map(|b| {
            let pool = b.extras.and_then(|e| e.pool);
            let pool_slug = pool.and_then(|p| pool_label(table, p.slug, p.name));
            MinedBlock {
                height: b.height,
                pool_slug,
                timestamp: b.timestamp,
            }
        })
        .collect();
    blocks.sort_by_key(|b| b.height);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::compute_stats;

    const POOLS_JSON: &str = r#"{
        "pools": [
            {"poolId": 111, "name": "Foundry USA", "slug": "foundryusa", "blockCount": 36, "rank": 1},
            {"poolId": 44, "name": "AntPool", "slug": "antpool", "blockCount": 27, "rank": 2},
            {"poolId": 2, "name": "SlushPool", "slug": "slushpool", "blockCount": 9, "rank": 3},
            {"poolId": 3, "name": "Braiins Pool", "slug": "braiins-pool", "blockCount": 9, "rank": 4},
            {"poolId": 9, "name": "Some New Pool", "slug": "newpool", "blockCount": 63, "rank": 5}
        ],
        "blockCount": 144,
        "lastEstimatedHashrate": 6.1e20
    }"#;

    #[test]
    fn shares_are_canonical_percentages() {
        let resp: PoolsResponse = serde_json::from_str(POOLS_JSON).unwrap();
        let shares = shares_from_response(PoolTable::builtin(), &resp).unwrap();

        let slugs: Vec<&str> = shares.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["foundryusa", "antpool", "braiinspool", "unknown"]);
        assert_eq!(shares[0].hashrate_pct, 25.0);
        assert_eq!(shares[1].hashrate_pct, 18.75);
        assert_eq!(shares[2].hashrate_pct, 12.5);
        assert_eq!(shares[3].hashrate_pct, 43.75);
    }

    #[test]
    fn missing_total_falls_back_to_sum() {
        let resp: PoolsResponse =
            serde_json::from_str(r#"{"pools":[{"slug":"viabtc","blockCount":1},{"slug":"luxor","blockCount":3}]}"#)
                .unwrap();
        let shares = shares_from_response(PoolTable::builtin(), &resp).unwrap();
        assert_eq!(shares[0].hashrate_pct, 25.0);
        assert_eq!(shares[1].hashrate_pct, 75.0);
    }

    #[test]
    fn zero_counts_are_rejected() {
        let resp: PoolsResponse =
            serde_json::from_str(r#"{"pools":[{"slug":"viabtc","blockCount":0}],"blockCount":0}"#)
                .unwrap();
        assert!(matches!(
            shares_from_response(PoolTable::builtin(), &resp),
            Err(MempoolError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_pool_list_is_rejected() {
        let resp: PoolsResponse =
            serde_json::from_str(r#"{"pools":[],"blockCount":144}"#).unwrap();
        assert!(matches!(
            shares_from_response(PoolTable::builtin(), &resp),
            Err(MempoolError::InvalidData(_))
        ));
    }

    #[test]
    fn unrecognised_slug_falls_back_to_name_for_shares_and_blocks() {
        let table = PoolTable::builtin();
        let pools: PoolsResponse = serde_json::from_str(
            r#"{"pools":[{"name":"Foundry USA","slug":"foundry-new","blockCount":10}],"blockCount":10}"#,
        )
        .unwrap();
        let upstream: Vec<UpstreamBlock> = serde_json::from_str(
            r#"[{"height": 900000, "timestamp": 1700000000,
                 "extras": {"pool": {"name": "Foundry USA", "slug": "foundry-new"}}}]"#,
        )
        .unwrap();

        let shares = shares_from_response(table, &pools).unwrap();
        let blocks = blocks_from_response(table, upstream);
        assert_eq!(blocks[0].pool_slug.as_deref(), Some("Foundry USA"));

        let stats = compute_stats(&blocks, &shares);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].slug, "foundryusa");
        assert_eq!(stats[0].hashrate_pct, 100.0);
        assert_eq!(stats[0].actual_blocks, 1);
        assert_eq!(stats[0].luck, 100.0);
    }

    #[test]
    fn unknown_slug_and_name_keep_slug() {
        let upstream: Vec<UpstreamBlock> = serde_json::from_str(
            r#"[{"height": 1, "timestamp": 1, "extras": {"pool": {"name": "Nobody", "slug": "nobody-pool"}}}]"#,
        )
        .unwrap();
        let blocks = blocks_from_response(PoolTable::builtin(), upstream);
        assert_eq!(blocks[0].pool_slug.as_deref(), Some("nobody-pool"));
    }

    #[test]
    fn blocks_keep_raw_pool_and_sort() {
        let resp: Vec<UpstreamBlock> = serde_json::from_str(
            r#"[
                {"id": "00aa", "height": 900002, "timestamp": 1700001200,
                 "extras": {"pool": {"id": 1, "name": "Foundry USA", "slug": "foundryusa"}}},
                {"id": "00bb", "height": 900001, "timestamp": 1700000600,
                 "extras": {"pool": {"id": 2, "name": "MARA Pool"}}},
                {"id": "00cc", "height": 900000, "timestamp": 1700000000}
            ]"#,
        )
        .unwrap();
        let blocks = blocks_from_response(PoolTable::builtin(), resp);

        let heights: Vec<u64> = blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![900000, 900001, 900002]);
        assert_eq!(blocks[0].pool_slug, None);
        assert_eq!(blocks[1].pool_slug.as_deref(), Some("MARA Pool"));
        assert_eq!(blocks[2].pool_slug.as_deref(), Some("foundryusa"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = MempoolClient::new("https://mempool.space/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://mempool.space");
    }
}
