// src/main.rs

use ox_quiz::config::Config;
use ox_quiz::db;
use ox_quiz::routes;
use ox_quiz::services::QuizService;
use ox_quiz::state::AppState;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let repository = db::init_repository(&config)
        .await
        .expect("Failed to initialize the database");

    let state = AppState {
        quiz_service: QuizService::new(repository),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_addr)
        .await
        .expect("Failed to bind listening address");
    tracing::info!("Listening on {}", config.server_addr);

    axum::serve(listener, app).await.expect("Server error");
}
