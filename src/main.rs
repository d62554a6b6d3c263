use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medimg_api::{app::app_with_layers, config, AppState};

#[derive(Parser, Debug)]
#[command(name = "medimg-api")]
#[command(about = "Medical imaging API server")]
#[command(version)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    host: String,

    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI, GROQ_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medimg_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServeArgs::parse();
    let config = config::config();
    tracing::info!("Starting medimg-api in {:?} mode", config.environment);

    let state = AppState::from_config(config)?;
    let app = app_with_layers(state, &config.security.cors_origins);

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
