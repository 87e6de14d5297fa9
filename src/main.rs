mod config;
mod db;
mod error;
mod llm;
mod routes;
mod services;
mod state;
mod vector;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    // LLM and vector store are optional; the chatbot degrades without them.
    let llm: Option<Arc<dyn llm::LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; chatbot answers disabled");
            None
        }
    };
    let vector: Option<Arc<dyn vector::VectorSearch>> = match vector::VectorClient::from_env() {
        Ok(client) => {
            tracing::info!(collection = client.collection(), "vector store initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "vector store not configured; retrieval disabled");
            None
        }
    };

    let state = state::AppState::new(pool, config.auth, config.chatbot, llm, vector);

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "textbook api listening");
    axum::serve(listener, app).await.expect("server failed");
}
