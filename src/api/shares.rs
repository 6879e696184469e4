use actix_web::{HttpResponse, Responder, get, put, web};
use log::{debug, info};

use super::models::{AppState, SharesResponse};
use crate::mining::{PoolShare, Window, canonical_shares};

/// Stored hashrate shares for a window (empty if none stored yet).
#[get("/shares/{window}/")]
pub async fn get_shares(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let window: Window = match path.parse() {
        Ok(w) => w,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };
    let shares = {
        let map = state.shares.lock().expect("mutex poisoned");
        map.get(&window).cloned().unwrap_or_default()
    };
    HttpResponse::Ok().json(shares_response(window, shares))
}

/// Replace the shares for a window. Slugs are resolved to canonical pools
/// before they are stored.
#[put("/shares/{window}/")]
pub async fn put_shares(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Vec<PoolShare>>,
) -> impl Responder {
    let window: Window = match path.parse() {
        Ok(w) => w,
        Err(msg) => return HttpResponse::BadRequest().body(msg),
    };
    if let Err(msg) = validate_shares(&body) {
        return HttpResponse::BadRequest().body(msg);
    }

    let shares = canonical_shares(state.pools, &body);
    debug!(
        "PUT /shares/{window}/ - {} rows -> {} canonical pools",
        body.len(),
        shares.len()
    );
    {
        let mut map = state.shares.lock().expect("mutex poisoned");
        map.insert(window, shares.clone());
    }
    info!("SHARES - stored {} pools for {window}", shares.len());

    HttpResponse::Ok().json(shares_response(window, shares))
}

fn shares_response(window: Window, shares: Vec<PoolShare>) -> SharesResponse {
    SharesResponse {
        window,
        total_pct: shares.iter().map(|s| s.hashrate_pct).sum(),
        shares,
    }
}

fn validate_shares(shares: &[PoolShare]) -> Result<(), &'static str> {
    for share in shares {
        if share.slug.trim().is_empty() {
            return Err("share slug required");
        }
        if !share.hashrate_pct.is_finite() || !(0.0..=100.0).contains(&share.hashrate_pct) {
            return Err("hashrate_pct must be between 0 and 100");
        }
    }
    Ok(())
}
