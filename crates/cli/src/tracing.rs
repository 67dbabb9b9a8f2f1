use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_log::AsTrace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Log to stderr at the requested verbosity, and optionally to a trace file.
///
/// The trace file captures everything, unless `RUST_LOG` says otherwise.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let level = verbose
        .log_level_filter()
        .as_trace();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level);

    let trace_layer = match trace {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("Creating trace file. path: {}", path.display()))?;

            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_filter(filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(trace_layer)
        .try_init()?;

    Ok(())
}
