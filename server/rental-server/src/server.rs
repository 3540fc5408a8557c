use axum::Router;
use rental_sdk::MarketplaceConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ServerError;
use crate::ledger::{LedgerProvider, RpcLedger};
use crate::pinning::{MetadataPinner, PinataClient};
use crate::routes;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub marketplace: MarketplaceConfig,
    pub ledger: Arc<dyn LedgerProvider>,
    pub pinner: Arc<dyn MetadataPinner>,
}

pub fn router(state: AppState) -> Router {
    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_rental_server(config: Config) -> Result<(), ServerError> {
    let marketplace = config.marketplace()?;
    if config.pinata_jwt.is_none() {
        warn!("Pinata_JWT is not set; metadata uploads will be rejected by the pinning service");
    }

    let state = AppState {
        marketplace,
        ledger: Arc::new(RpcLedger::new(config.rpc_url.clone())),
        pinner: Arc::new(PinataClient::new(
            config.pinata_api_url.clone(),
            config.pinata_gateway_url.clone(),
            config.pinata_jwt.clone(),
        )?),
    };

    let listener = TcpListener::bind(config.bind_address).await?;
    info!(
        address = %config.bind_address,
        rpc_url = %config.rpc_url,
        item_registration_program = %marketplace.item_registration_program,
        rental_program = %marketplace.rental_program,
        "rental server listening"
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
