use aintar_config::{LogFormat, LoggingConfig};
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Filter used when `RUST_LOG` is unset: `level` for our crates, quieter
/// dependencies.
fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},tower_http=warn,hyper=warn,h2=warn")))
}

/// Install the global subscriber.
///
/// - **Console**: compact with file/line, or JSON when `LOG_FORMAT=json`
/// - **File**: when `LOG_DIR` is set, JSON lines in a daily rolling
///   `aintar.log`, written off-thread
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(default_filter(&config.level))
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(default_filter(&config.level))
            .boxed(),
    };
    layers.push(console_layer);

    let mut guard = None;
    if let Some(dir) = &config.directory {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "aintar.log");
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(default_filter(&config.level))
                .boxed(),
        );
        guard = Some(worker_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}
