// Logging module for structured logging using the tracing crate

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::Resource;
use std::any::Any;
use std::backtrace::Backtrace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::{LoggingConfig, LoggingFormat};
use crate::constants::SERVICE_NAME;

/// Logging error types
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{0}'")]
    Filter(String),

    #[error("Failed to start telemetry runtime: {0}")]
    Runtime(String),

    #[error("Failed to create exporter: {0}")]
    Exporter(String),

    #[error("Failed to initialize subscriber: {0}")]
    Init(String),
}

/// Keeps the remote sink alive; flushes and shuts it down on drop.
pub struct LoggingGuard {
    remote: Option<RemoteSink>,
}

struct RemoteSink {
    provider: TracerProvider,
    // Batch export tasks run here, outside the pingora runtimes
    runtime: tokio::runtime::Runtime,
}

impl LoggingGuard {
    pub fn has_remote_sink(&self) -> bool {
        self.remote.is_some()
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        if let Some(remote) = self.remote.take() {
            let _enter = remote.runtime.enter();
            if let Err(e) = remote.provider.shutdown() {
                eprintln!("Failed to flush remote log sink: {}", e);
            }
        }
    }
}

/// Initialize the tracing subscriber for structured logging
///
/// The subscriber is configured with:
/// - an `EnvFilter` taken from `RUST_LOG`, falling back to `config.level`
/// - JSON or pretty formatting to stdout
/// - an OTLP exporter when `config.remote_endpoint` is set
///
/// Must be called once, before any other component logs.
pub fn init_subscriber(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = env_filter(&config.level)?;

    let remote = match &config.remote_endpoint {
        Some(endpoint) => Some(remote_sink(endpoint)?),
        None => None,
    };

    let telemetry = remote.as_ref().map(|remote| {
        tracing_opentelemetry::layer().with_tracer(remote.provider.tracer(SERVICE_NAME))
    });

    let stdout = match config.format {
        LoggingFormat::Json => fmt::layer().json().with_current_span(false).boxed(),
        LoggingFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(telemetry)
        .with(filter)
        .with(stdout)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    if let Some(endpoint) = &config.remote_endpoint {
        tracing::info!(endpoint = %endpoint, "Remote log sink enabled");
    }

    Ok(LoggingGuard { remote })
}

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|_| LoggingError::Filter(level.to_string())),
    }
}

fn remote_sink(endpoint: &str) -> Result<RemoteSink, LoggingError> {
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::runtime;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("imgate-otlp")
        .enable_all()
        .build()
        .map_err(|e| LoggingError::Runtime(e.to_string()))?;

    let provider = {
        let _enter = runtime.enter();

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .map_err(|e| LoggingError::Exporter(e.to_string()))?;

        TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new(vec![
                KeyValue::new("service.name", SERVICE_NAME),
                KeyValue::new("host.name", host_name()),
            ]))
            .build()
    };

    Ok(RemoteSink { provider, runtime })
}

/// Local host name, or "unknown" when it cannot be read.
pub fn host_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Log every panic with its message, location and a backtrace.
///
/// The default hook is replaced, so panics reach the log sink instead of stderr.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        let backtrace = Backtrace::force_capture();

        tracing::error!(
            error = %message,
            location = %location,
            error_stack = %backtrace,
            "Panic occurred"
        );
    }));
}

/// Extract the message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
