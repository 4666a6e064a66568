use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use co_api::app::create_app;
use co_api::routes::otp::AppState;
use co_api::telemetry::init_tracing;
use co_core::repositories::{
    ConsultantRepository, InMemoryConsultantRepository, InMemoryOtpRecordRepository,
    OtpRecordRepository,
};
use co_core::services::{OtpService, OtpServiceConfig, PasswordResetConfig, PasswordResetService};
use co_infra::database::{DatabasePool, MySqlConsultantRepository, MySqlOtpRecordRepository};
use co_infra::messaging::create_messaging_gateway;
use co_shared::config::{AppConfig, Environment, LoggingConfig, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logging first so configuration warnings are not lost
    init_tracing(&LoggingConfig::from_env(Environment::from_env()));
    let config = AppConfig::from_env();

    tracing::info!(
        environment = %config.environment,
        storage = ?config.storage,
        provider = ?config.messaging.provider,
        "Starting Consultly API server"
    );

    let gateway = create_messaging_gateway(&config.messaging, config.environment)
        .context("failed to create messaging gateway")?;

    let (records, consultants): (Arc<dyn OtpRecordRepository>, Arc<dyn ConsultantRepository>) =
        match config.storage {
            StorageBackend::Mysql => {
                let pool = DatabasePool::new(&config.database)
                    .await
                    .context("failed to connect to database")?;
                if !pool.health_check().await? {
                    anyhow::bail!("database health check failed");
                }
                tracing::info!(stats = %pool.get_statistics(), "Database ready");
                (
                    Arc::new(MySqlOtpRecordRepository::new(pool.get_pool().clone())),
                    Arc::new(MySqlConsultantRepository::new(pool.get_pool().clone())),
                )
            }
            StorageBackend::Memory => {
                if config.is_production() {
                    anyhow::bail!("in-memory storage is not allowed in production");
                }
                tracing::warn!("Using in-memory storage; OTP records are lost on restart");
                (
                    Arc::new(InMemoryOtpRecordRepository::new()),
                    Arc::new(InMemoryConsultantRepository::new()),
                )
            }
        };

    let otp_service = Arc::new(OtpService::new(
        gateway,
        records,
        OtpServiceConfig::from(&config.otp),
    ));
    let password_reset = Arc::new(PasswordResetService::new(
        otp_service.clone(),
        consultants,
        PasswordResetConfig::default(),
    ));
    let app_state = web::Data::new(AppState {
        otp_service,
        password_reset,
    });

    let bind_address = config.server.bind_address();
    let environment = config.environment;
    let json_limit = config.server.max_payload_size;
    tracing::info!(address = %bind_address, "Server will bind to address");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), environment, json_limit));
    // 0 keeps the actix default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    Ok(())
}
