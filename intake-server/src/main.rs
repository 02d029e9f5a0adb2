use intake_server::core::BoxError;
use intake_server::utils::logger;
use intake_server::{Config, Server};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        telemetry = config.telemetry_enabled,
        "Starting intake-server"
    );

    Server::new(config).run().await?;
    Ok(())
}
