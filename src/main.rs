use cricket_stats_api::{AppState, Config, db, routes};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cricket_stats_api::init_tracing();

    tracing::info!("Starting api server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = db::connect(&config)
        .await
        .expect("Failed to set up database client");

    tracing::info!("Database client ready.");

    let addr = config.addr();
    let app = routes::router(AppState::new(client));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
