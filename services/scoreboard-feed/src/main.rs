use std::net::SocketAddr;

use tokio::net::TcpListener;

use scoreboard_feed::router::create_router;
use scoreboard_feed::state::AppState;
use scoreboard_feed::store::SeedData;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting scoreboard feed service");

    let state = AppState::new();

    // Contest, class, problem, and contender records come from the
    // registration layer; a seed file stands in for it.
    if let Ok(path) = std::env::var("SCOREBOARD_SEED") {
        let raw = std::fs::read_to_string(&path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        state.store.load(seed)?;
        tracing::info!(path = %path, "Seeded contest data");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
