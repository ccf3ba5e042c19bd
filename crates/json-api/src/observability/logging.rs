//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are noisy at `info` and below.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.logging.log_level)));

    let tracer = tracer_provider
        .map(|provider| provider.tracer(config.observability.otel_service_name.clone()));

    match config.logging.log_format {
        LogFormat::Compact => install(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            filter,
            tracer,
        ),
        LogFormat::Json => install(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            filter,
            tracer,
        ),
    }
}

/// `level` for Foundry's own crates, capped at `warn` for chatty dependencies.
fn default_directives(level: &str) -> String {
    let mut directives = level.to_owned();

    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=warn"));
    }

    directives.push_str(&format!(",foundry_app={level},foundry_json={level}"));

    directives
}

fn install<F>(
    fmt_layer: F,
    filter: EnvFilter,
    tracer: Option<SdkTracer>,
) -> Result<(), ObservabilityError>
where
    F: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer)))
        .with(filter)
        .try_init()?;

    Ok(())
}
