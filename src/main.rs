use calculator_server::{
    build_app, config::Config, logging, mcp::server::ServerManifest, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;
    let manifest = ServerManifest::new();

    info!(
        server = %manifest.name,
        version = %manifest.version,
        tools = manifest.tools.len(),
        "tool catalog loaded"
    );

    let app = build_app(AppState::new(manifest));
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
