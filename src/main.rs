use axum::{
    routing::{get, post},
    Router,
};
use premiacoes_rust::{api, AppConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inicializa logs com horário local
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Carrega configuração
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // Defaults de premiação compartilhados entre as requisições
    let premiacao = Arc::new(config.premiacao.clone());

    // Constrói rotas
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/report/faturamento", post(api::faturamento_report))
        .route("/api/report/premiacoes", post(api::premiacao_report))
        .layer(ServiceBuilder::new())
        .with_state(premiacao);

    // Inicia servidor
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/report/faturamento  - consolidado por loja/vendedor");
    info!("  POST /api/report/premiacoes   - premiação agregada por loja");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
