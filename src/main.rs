mod config;
mod routes;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    for dir in [&config.web_dir, &config.pkg_dir] {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "static directory missing; requests will 404");
        }
    }

    let app = routes::app(&config);
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;

    tracing::info!(port = config.port, web = %config.web_dir.display(), "corkboard listening");
    axum::serve(listener, app).await?;
    Ok(())
}
