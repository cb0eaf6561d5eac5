mod routes;
mod storefront;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use storefront::middleware::storefront_middleware;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,storefront_middleware_rs=debug")),
        )
        .init();

    let app_state = storefront::build_state().expect("valid storefront configuration");

    let app = Router::new()
        .route("/", get(routes::home))
        .route("/apps/{id}", get(routes::app_detail))
        .route("/apps/{id}/review", post(routes::submit_review))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            storefront_middleware,
        ))
        .with_state(app_state);

    let addr: SocketAddr = "127.0.0.1:5001".parse().unwrap();
    tracing::info!("Axum storefront example running on http://{addr}");

    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
