use tracing::info;

use campus_boarding::config::BoardingConfig;
use campus_boarding::infra::mem::MemStore;
use campus_boarding::infra::seed::seed_demo_data;
use campus_boarding::router::build_router;
use campus_boarding::state::AppState;

#[tokio::main]
async fn main() {
    campus_core::tracing::init_tracing();

    let config = BoardingConfig::from_env();

    let state = AppState {
        store: MemStore::new(),
    };
    if config.seed_demo {
        seed_demo_data(&state).await.expect("failed to seed demo data");
        info!("demo data seeded");
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.boarding_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("boarding service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
