use connectx::prelude::*;
use tracing_subscriber::EnvFilter;

/// Listen address used when `CONNECTX_ADDR` is unset.
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("CONNECTX_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    tracing::info!(%addr, "starting ConnectX server");

    let server = ConnectxServerBuilder::new()
        .bind(&addr)
        .build(TokenAuthenticator, AnonymousProfiles)
        .await?;

    server.run().await?;
    Ok(())
}
