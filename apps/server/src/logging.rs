//! Logging and OpenTelemetry setup for the directory server
//!
//! Console output is always on (human-readable or JSON); a rotating log file and
//! OTLP trace export are optional. `RUST_LOG` overrides the configured level.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{Sampler, TracerProvider},
    Resource,
};
use std::time::Duration;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt, layer::Layered, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::config::LoggingConfig;

const TRACER_NAME: &str = "hospital-directory";

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Keeps the file writer flushing and shuts the tracer provider down on drop.
/// Hold it for the lifetime of the process.
pub struct TelemetryGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber described by `config`
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<TelemetryGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut otel_error = None;

    if config.opentelemetry_enabled {
        match init_tracer_provider(config) {
            Ok(provider) => {
                let tracer = provider.tracer(TRACER_NAME);
                layers.push(
                    tracing_opentelemetry::layer()
                        .with_tracer(tracer)
                        .with_tracked_inactivity(true)
                        .boxed(),
                );
                global::set_tracer_provider(provider);
            }
            Err(e) => otel_error = Some(e),
        }
    }

    layers.push(console_layer(config.json));

    let file_guard = if config.file_enabled {
        let (writer, guard) = file_writer(config)?;
        layers.push(file_layer(config.json, writer));
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(build_env_filter(&config.level))
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    if let Some(err) = otel_error {
        tracing::warn!(
            error = %err,
            "OpenTelemetry export unavailable, continuing with local logging only"
        );
    }

    tracing::info!(
        level = %config.level,
        json = config.json,
        file = config.file_enabled,
        otel_enabled = config.opentelemetry_enabled,
        service_name = %config.service_name,
        environment = %config.deployment_environment,
        "Logging initialized"
    );

    Ok(TelemetryGuard {
        _file_guard: file_guard,
    })
}

fn console_layer(json: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stdout)
            .boxed()
    }
}

fn file_layer(json: bool, writer: NonBlocking) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    }
}

fn resource(config: &LoggingConfig) -> Resource {
    let service_version = config
        .service_version
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", service_version),
        KeyValue::new(
            "deployment.environment",
            config.deployment_environment.clone(),
        ),
    ])
}

fn sampler(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
    }
}

/// OTLP (gRPC) exporter behind a batch span processor
fn init_tracer_provider(config: &LoggingConfig) -> anyhow::Result<TracerProvider> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(&config.otlp_endpoint)
        .with_timeout(Duration::from_secs(config.otlp_timeout_seconds))
        .build_span_exporter()
        .map_err(|e| anyhow::anyhow!("Failed to create OTLP exporter: {e}"))?;

    let trace_config = opentelemetry_sdk::trace::Config::default()
        .with_sampler(sampler(config.trace_sample_ratio))
        .with_resource(resource(config));

    Ok(TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_config(trace_config)
        .build())
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Directives for both crate targets, keeping sqlx quiet
fn default_directives(level: &str) -> String {
    format!("hospital_directory={level},hospital_server={level},tower_http=info,sqlx=warn")
}

fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn file_writer(config: &LoggingConfig) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&config.file_directory)?;
    let appender = RollingFileAppender::new(
        rotation(&config.file_rotation),
        &config.file_directory,
        format!("{}.log", config.file_prefix),
    );
    Ok(tracing_appender::non_blocking(appender))
}

/// Flush and stop the OpenTelemetry pipeline
pub fn shutdown_telemetry() {
    global::shutdown_tracer_provider();
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        shutdown_telemetry();
    }
}
