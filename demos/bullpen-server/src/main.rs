use bullpen::BullpenServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Hosting platforms inject PORT; default matches local dev clients.
    let port = std::env::var("PORT").unwrap_or_else(|_| "10000".into());
    let addr = format!("0.0.0.0:{port}");
    tracing::info!(%addr, "starting bulls-and-cows server");

    let server = BullpenServerBuilder::new().bind(&addr).build().await?;
    server.run().await?;
    Ok(())
}
