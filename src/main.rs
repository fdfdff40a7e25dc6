//! Content credibility service: binary entrypoint.
//! Boots the Axum HTTP server with the verifier, the post store and the
//! moderation routes.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use content_credibility::logging;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let app = content_credibility::app().await?;

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(target: "verifier", %addr, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
