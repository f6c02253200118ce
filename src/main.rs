use huesphere::{AppConfig, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = AppConfig::default();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    tracing::info!("Starting {}", config.title);

    if let Err(err) = run(config) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
