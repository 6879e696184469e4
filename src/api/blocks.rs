use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info};

use super::models::{AppState, BlocksQuery, BlocksResponse, IngestResponse};
use crate::mining::{DEFAULT_BLOCK_LIMIT, MAX_STATS_BLOCKS, MinedBlock};

/// Most recent stored blocks, ascending by height.
#[get("/blocks/")]
pub async fn get_blocks(
    state: web::Data<AppState>,
    query: web::Query<BlocksQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_BLOCK_LIMIT)
        .min(MAX_STATS_BLOCKS);
    let store = state.blocks.lock().expect("mutex poisoned");
    let blocks = store.recent(limit);
    HttpResponse::Ok().json(BlocksResponse {
        count: blocks.len(),
        tip_height: store.tip().map(|b| b.height),
        blocks,
    })
}

/// Ingest mined blocks. A block at an already-stored height replaces it.
#[post("/blocks/")]
pub async fn post_blocks(
    state: web::Data<AppState>,
    body: web::Json<Vec<MinedBlock>>,
) -> impl Responder {
    let blocks = body.into_inner();
    if let Err(msg) = validate_blocks(&blocks) {
        return HttpResponse::BadRequest().body(msg);
    }

    let received = blocks.len();
    let (added, stored) = {
        let mut store = state.blocks.lock().expect("mutex poisoned");
        let added = store.extend(blocks);
        (added, store.count())
    };
    debug!("POST /blocks/ - received={received} added={added} stored={stored}");
    if added > 0 {
        info!("BLOCKS - {added} new block(s), store size now {stored}");
    }

    HttpResponse::Ok().json(IngestResponse {
        received,
        added,
        stored,
    })
}

fn validate_blocks(blocks: &[MinedBlock]) -> Result<(), &'static str> {
    if blocks.is_empty() {
        return Err("at least one block required");
    }
    if blocks.iter().any(|b| b.timestamp < 0) {
        return Err("block timestamp must not be negative");
    }
    Ok(())
}
