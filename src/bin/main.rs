use std::net::SocketAddr;

use anyhow::Context;
use exam_attendance::bootstrap::initialize_admin_user;
use exam_attendance::static_service::get_database_connection;
use exam_attendance::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    let db_connection = get_database_connection().await?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(db_connection).await {
        tracing::error!("Failed to initialize admin user: {:#}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server error")?;

    Ok(())
}
