mod llm;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // The credential is deliberately not validated here: an absent key
    // surfaces as an upstream auth failure at request time.
    let config = llm::config::LlmConfig::from_env();
    if config.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY not set — upstream requests will fail until it is");
    }
    let llm = llm::LlmClient::new(config).expect("HTTP client build failed");
    tracing::info!(model = llm.model(), "LLM client initialized");

    let state = state::AppState::new(llm);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "streamchat listening");
    axum::serve(listener, app).await.expect("server failed");
}
