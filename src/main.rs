mod api;
mod config;
mod mempool;
mod mining;
mod pools;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};

use api::AppState;
use config::Config;
use pools::PoolTable;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();

    // Mapping-table invariants are checked once, before any request is served
    let table = PoolTable::builtin();
    if let Err(e) = table.validate() {
        error!("pool table is invalid: {e}");
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
    }
    info!(
        "pool table v{} loaded ({} pools)",
        table.version(),
        table.pool_count()
    );

    info!(
        "Starting BlockBet API at http://{}:{} (upstream {})",
        config.host, config.port, config.mempool_api_url
    );

    let state = web::Data::new(AppState::new(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
