use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, PoolTableResponse, ResolveResponse};
use crate::pools::normalize;

/// List every canonical pool with its display name and color.
#[get("/pools/")]
pub async fn list_pools(state: web::Data<AppState>) -> impl Responder {
    let pools = state.pools.identities();
    HttpResponse::Ok().json(PoolTableResponse {
        version: state.pools.version().to_string(),
        count: pools.len(),
        pools,
    })
}

/// Resolve one raw pool name (e.g. `Foundry-USA`) to its canonical identity.
#[get("/pools/resolve/{raw}/")]
pub async fn resolve_pool(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let raw = path.into_inner();
    let identity = state.pools.resolve(Some(&raw));
    HttpResponse::Ok().json(ResolveResponse {
        key: normalize(&raw),
        raw,
        identity,
    })
}
