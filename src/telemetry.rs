use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging on stderr, leaving stdout to command output.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_telemetry(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    if config.json_logs {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .with(filter)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .try_init()?;
    }

    tracing::debug!("Storefront telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one batch
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with common batch attributes
pub fn create_batch_span(operation: &str, batch_id: &str, total: usize) -> tracing::Span {
    tracing::info_span!(
        "action_batch",
        operation = operation,
        batch.id = batch_id,
        batch.total = total,
        otel.kind = "internal"
    )
}
