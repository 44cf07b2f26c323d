//! Tracing subscriber setup for the runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `SNAKE_LOG_FORMAT=json` switches to JSON lines.
pub fn init_telemetry() -> Result<()> {
    let json = std::env::var("SNAKE_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,snake_runner=debug,snake_world=info".into()),
        )
        .with((!json).then(|| fmt::layer().with_target(true)))
        .with(json.then(|| fmt::layer().json().with_target(true)))
        .try_init()?;

    info!(json, "Telemetry initialized");
    Ok(())
}
