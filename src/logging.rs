//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem. The client is
//! a library, so installing a subscriber is opt-in and never overrides one the
//! host application already set.

use chrono::Utc;
use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use crate::error::AnalystError;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let use_ansi = IsTerminal::is_terminal(&std::io::stdout());

        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(use_ansi)
            .with_filter(EnvFilter::new(&log_level));

        let subscriber = tracing_subscriber::registry().with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("GIS_ANALYST_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log a failed analysis round-trip with its message key and cause
pub fn log_analysis_failure(service: &str, task_id: Uuid, error: &AnalystError) {
    tracing::warn!(
        service = %service,
        task_id = %task_id,
        message_key = error.message_key(),
        error = %error,
        timestamp = %Utc::now().to_rfc3339(),
        "Spatial analysis request failed"
    );
}

/// Log a submission dropped at the validation gate
pub fn log_rejected_submission(service: &str, reason: &str) {
    tracing::debug!(
        service = %service,
        reason = %reason,
        "Analysis submission rejected; no task created"
    );
}
