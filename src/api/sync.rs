use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info, warn};

use super::models::{AppState, SyncResponse};
use crate::mining::Window;

/// Pull hashrate shares for `window` from mempool.space into the share
/// store. Upstream responses are cached for the configured TTL.
#[post("/sync/shares/{window}/")]
pub async fn sync_shares(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let window: Window = match path.parse() {
        Ok(w) => w,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };
    let Some(client) = state.mempool.as_ref() else {
        return HttpResponse::ServiceUnavailable().body("mempool client not configured");
    };

    let (hit, cache_ttl) = {
        let cache = state.share_cache.lock().expect("mutex poisoned");
        (cache.get(&window), cache.ttl())
    };
    let cached = hit.is_some();
    let shares = match hit {
        Some(shares) => shares,
        None => match client.pool_shares(window).await {
            Ok(shares) => {
                let mut cache = state.share_cache.lock().expect("mutex poisoned");
                cache.insert(window, shares.clone());
                shares
            }
            Err(e) => {
                warn!("SYNC - shares {window} failed: {e}");
                return HttpResponse::BadGateway().body(e.to_string());
            }
        },
    };
    debug!("SYNC - shares {window}: {} pools (cached={cached})", shares.len());

    let received = shares.len();
    {
        let mut map = state.shares.lock().expect("mutex poisoned");
        map.insert(window, shares);
    }
    info!("SYNC - stored {received} pool shares for {window}");

    HttpResponse::Ok().json(SyncResponse {
        source: client.base_url().to_string(),
        cached,
        cache_ttl_secs: cache_ttl.as_secs(),
        received,
        stored: received,
    })
}

/// Pull the latest blocks from mempool.space into the block store.
#[post("/sync/blocks/")]
pub async fn sync_blocks(state: web::Data<AppState>) -> impl Responder {
    let Some(client) = state.mempool.as_ref() else {
        return HttpResponse::ServiceUnavailable().body("mempool client not configured");
    };

    let (hit, cache_ttl) = {
        let cache = state.block_cache.lock().expect("mutex poisoned");
        (cache.get(&()), cache.ttl())
    };
    let cached = hit.is_some();
    let blocks = match hit {
        Some(blocks) => blocks,
        None => match client.recent_blocks().await {
            Ok(blocks) => {
                let mut cache = state.block_cache.lock().expect("mutex poisoned");
                cache.insert((), blocks.clone());
                blocks
            }
            Err(e) => {
                warn!("SYNC - blocks failed: {e}");
                return HttpResponse::BadGateway().body(e.to_string());
            }
        },
    };

    let received = blocks.len();
    let (added, stored) = {
        let mut store = state.blocks.lock().expect("mutex poisoned");
        let added = store.extend(blocks);
        (added, store.count())
    };
    info!("SYNC - {received} blocks received, {added} new, store size {stored}");

    HttpResponse::Ok().json(SyncResponse {
        source: client.base_url().to_string(),
        cached,
        cache_ttl_secs: cache_ttl.as_secs(),
        received,
        stored,
    })
}
