use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_intake::{api::create_router, application::builder::ApplicationBuilder, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file; real environment variables take precedence
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.log_format);

    info!("Starting image intake service");

    config.validate().map_err(anyhow::Error::msg)?;
    info!("Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();
    let state = ApplicationBuilder::new(config)
        .with_infrastructure()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize infrastructure: {}", e))?
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
