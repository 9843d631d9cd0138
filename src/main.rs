#![recursion_limit = "256"]

mod config;
mod proxy;
mod routes;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is the normal production case.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::HostConfig::from_env().expect("invalid host configuration");

    let proxy = match &config.backend_url {
        Some(url) => {
            let proxy = proxy::Proxy::new(url.clone(), config.backend_timeout).expect("http client init failed");
            tracing::info!(backend = proxy.base_url(), timeout_secs = config.backend_timeout.as_secs(), "api proxy enabled");
            Some(proxy)
        }
        None => {
            tracing::warn!("BACKEND_URL not set, /api/v1 requests will answer 503");
            None
        }
    };

    let app = routes::app(proxy).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "jobdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
