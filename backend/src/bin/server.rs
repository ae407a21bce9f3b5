//! Appointment HTTP Server Binary
//!
//! Serves the appointment form and the JSON API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin appointment-server
//!
//! # With an explicit configuration file
//! APPOINTMENTS_CONFIG=/etc/appointments.toml cargo run --bin appointment-server
//! ```
//!
//! # Environment Variables
//!
//! - `APPOINTMENTS_CONFIG`: Path to the TOML configuration file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `APPOINTMENT_COUNT`: Appointments per schedule (default: 30)
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use appointment_dates::config::AppConfig;
use appointment_dates::http::{bind_listener, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting appointment server");

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    info!(
        appointment_count = config.schedule.appointment_count,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config);
    let app = create_router(state);

    let listener = bind_listener(&config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", config.bind_address(), e))?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
