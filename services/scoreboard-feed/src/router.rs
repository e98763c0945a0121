//! HTTP route wiring

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{scoreboard, tick, ws};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ticks", post(tick::create_tick))
        .route(
            "/ticks/:id",
            put(tick::update_tick).delete(tick::delete_tick),
        )
        .route("/contests/:id/scoreboard", get(scoreboard::get_scoreboard))
        .route("/live", get(ws::ws_handler));

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
