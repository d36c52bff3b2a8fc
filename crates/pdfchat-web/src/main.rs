use std::net::SocketAddr;
use std::sync::Arc;

use pdfchat_core::config;
use pdfchat_inference::HttpGenerationBackend;
use pdfchat_pdf_mupdf::MupdfExtractor;
use pdfchat_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let model_config = config::resolve_model_config(&config::load_config());
    tracing::info!(model = %model_config, "using generation service");

    let state = Arc::new(AppState {
        store: pdfchat_core::DocumentStore::new(),
        extractor: Arc::new(MupdfExtractor::new()),
        generator: Arc::new(HttpGenerationBackend::new(&model_config)?),
    });

    let app = pdfchat_web::router(state);

    let port = std::env::var("PDFCHAT_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
