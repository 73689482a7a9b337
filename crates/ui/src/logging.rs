use std::io;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, reload};

use crate::settings::state::DEFAULT_LOG_FILTER;

/// Handle to the installed log filter.
///
/// Tracing is installed before settings are read, so loader warnings are not lost. The
/// configured filter replaces the startup one afterwards unless `RUST_LOG` pinned it.
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

impl LogFilter {
    pub fn apply(&self, directives: &str) {
        if self.pinned {
            tracing::debug!("RUST_LOG is set, ignoring configured log filter {directives:?}");
            return;
        }

        match self.handle.reload(EnvFilter::new(directives)) {
            Ok(()) => tracing::debug!("log filter set to {directives:?}"),
            Err(error) => tracing::warn!("failed to apply log filter {directives:?}: {error}"),
        }
    }
}

/// Builds the subscriber used by the binary. `pinned` wins over any configured filter.
pub fn subscriber<W>(
    writer: W,
    pinned: Option<EnvFilter>,
) -> (impl Subscriber + Send + Sync + 'static, LogFilter)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let is_pinned = pinned.is_some();
    let filter = pinned.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer));
    (
        subscriber,
        LogFilter {
            handle,
            pinned: is_pinned,
        },
    )
}

/// Installs stderr logging as the global default, filtered by `RUST_LOG` when present.
pub fn init() -> LogFilter {
    let (subscriber, filter) = subscriber(io::stderr, EnvFilter::try_from_default_env().ok());
    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing subscriber already installed: {error}");
    }
    filter
}
