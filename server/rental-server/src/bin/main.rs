use clap::Parser;
use rental_server::{config::Config, server::start_rental_server, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    start_rental_server(config).await
}
