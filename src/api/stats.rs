use actix_web::{HttpResponse, Responder, get, web};
use chrono::Utc;
use log::debug;

use super::models::{AppState, NextBlockResponse, PoolStatsResponse};
use crate::mining::estimate::{average_interval, countdown, eta, probability_within};
use crate::mining::{
    ESTIMATE_WINDOW, MAX_STATS_BLOCKS, NEXT_BLOCK_HORIZON_SECS, TARGET_BLOCK_TIME_SECS, Window,
    compute_stats,
};

/// Expected vs. actual blocks and luck per pool over the last `count`
/// stored blocks, using the stored shares for `window`.
#[get("/stats/pools/{count}/{window}/")]
pub async fn get_pool_stats(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (count, window) = path.into_inner();
    let count = match parse_block_count(&count) {
        Ok(n) => n,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };
    let window: Window = match window.parse() {
        Ok(w) => w,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };

    // Snapshot inputs under short, separate locks
    let blocks = {
        let store = state.blocks.lock().expect("mutex poisoned");
        store.recent(count)
    };
    let shares = {
        let map = state.shares.lock().expect("mutex poisoned");
        map.get(&window).cloned().unwrap_or_default()
    };

    let pools = compute_stats(&blocks, &shares);
    debug!(
        "STATS - count={count} window={window} blocks_used={} shares={} pools={}",
        blocks.len(),
        shares.len(),
        pools.len()
    );

    HttpResponse::Ok().json(PoolStatsResponse {
        window,
        requested_blocks: count,
        blocks_used: blocks.len(),
        table_version: state.pools.version().to_string(),
        pools,
    })
}

/// When the next block is expected, from the spacing of recent blocks.
#[get("/stats/next-block/")]
pub async fn get_next_block(state: web::Data<AppState>) -> impl Responder {
    let (tip, mean) = {
        let store = state.blocks.lock().expect("mutex poisoned");
        let recent = store.recent(ESTIMATE_WINDOW);
        (store.tip().cloned(), average_interval(&recent))
    };
    let Some(tip) = tip else {
        return HttpResponse::NotFound().body("no blocks stored yet");
    };

    let mean = mean.unwrap_or(TARGET_BLOCK_TIME_SECS as f64);
    let expected_at = eta(tip.height, tip.timestamp, tip.height.saturating_add(1), mean);
    let now = Utc::now().timestamp();

    HttpResponse::Ok().json(NextBlockResponse {
        tip_height: tip.height,
        tip_timestamp: tip.timestamp,
        mean_interval_secs: mean,
        expected_at,
        countdown_secs: countdown(expected_at, now),
        horizon_secs: NEXT_BLOCK_HORIZON_SECS,
        probability_within_horizon: probability_within(NEXT_BLOCK_HORIZON_SECS as f64, mean),
    })
}

fn parse_block_count(raw: &str) -> Result<usize, &'static str> {
    let n: i64 = raw.trim().parse().map_err(|_| "block count must be an integer")?;
    if n <= 0 {
        return Err("block count must be positive");
    }
    if n as u64 > MAX_STATS_BLOCKS as u64 {
        return Err("block count too large (max 2016)");
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::parse_block_count;

    #[test]
    fn block_count_bounds() {
        assert_eq!(parse_block_count("10"), Ok(10));
        assert_eq!(parse_block_count("2016"), Ok(2016));
        assert!(parse_block_count("0").is_err());
        assert!(parse_block_count("-5").is_err());
        assert!(parse_block_count("2017").is_err());
        assert!(parse_block_count("ten").is_err());
    }
}
