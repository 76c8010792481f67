use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use paygate::config::{AppConfig, Config, LogFormat};
use paygate::core::traits::{ConfigStore, PaymentLedger};
use paygate::gateways::services::build_http_client;
use paygate::gateways::{CheckoutUrlCache, DuitkuGateway, GatewayService, TripayGateway};
use paygate::invoices::InvoiceLedger;
use paygate::modules::{gateways, health};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config.app);

    tracing::info!("Starting paygate");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let db_pool = config
        .database
        .create_pool()
        .context("Failed to create database pool")?;

    let ledger: Arc<dyn PaymentLedger> = Arc::new(InvoiceLedger::new(db_pool.clone()));
    let settings: Arc<dyn ConfigStore> = Arc::new(config.extension_settings());
    let client = build_http_client(config.app.http_timeout())
        .context("Failed to build gateway HTTP client")?;

    let mut service = GatewayService::new();
    service.register_gateway(Arc::new(DuitkuGateway::new(
        client.clone(),
        settings.clone(),
        ledger.clone(),
        config.duitku.base_url.clone(),
    )));
    service.register_gateway(Arc::new(TripayGateway::new(
        client,
        settings,
        ledger,
        config.tripay.base_url.clone(),
        CheckoutUrlCache::new(config.app.checkout_cache_ttl()),
    )));

    for gateway in service.list_gateways() {
        tracing::info!(
            gateway = %gateway.name,
            version = %gateway.metadata.version,
            "Gateway registered"
        );
    }

    let service = web::Data::new(service);
    let app_config = web::Data::new(config.app.clone());
    let db_pool = web::Data::new(db_pool);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .app_data(app_config.clone())
            .app_data(db_pool.clone())
            .configure(health::configure)
            .configure(gateways::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

fn init_tracing(app: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("paygate={},actix_web=info", app.log_level).into());

    match app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}
