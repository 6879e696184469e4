mod blocks;
mod health;
pub mod models;
mod pools;
mod shares;
mod stats;
mod sync;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(pools::list_pools)
            .service(pools::resolve_pool)
            .service(blocks::get_blocks)
            .service(blocks::post_blocks)
            .service(shares::get_shares)
            .service(shares::put_shares)
            .service(stats::get_next_block)
            .service(stats::get_pool_stats)
            .service(sync::sync_shares)
            .service(sync::sync_blocks),
    );
}
