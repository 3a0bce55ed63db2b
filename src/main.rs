use news_gateway::{config, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (log_level, log_format) = config::log_settings_from_env();
    init_tracing(&log_level, &log_format);

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    config.print_summary();

    server::run(config).await.inspect_err(|e| {
        tracing::error!("Server error: {:#}", e);
    })
}

/// Installs the global subscriber. Unknown formats fall back to text.
fn init_tracing(log_level: &str, log_format: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
