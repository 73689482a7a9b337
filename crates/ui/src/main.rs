use std::io;
use std::process::ExitCode;

use murmur_ui::app::{ChatAppShell, bootstrap};
use murmur_ui::logging;
use murmur_ui::settings::SettingsStore;

/// Application entry point.
///
/// 1. Tracing to stderr, filtered by `RUST_LOG` or the default filter
/// 2. Settings from defaults, the settings file and `MURMUR_*` environment variables
/// 3. The configured log filter, unless `RUST_LOG` is set
/// 4. Roster and history from the configured seed file or the demo data
/// 5. The line-driven shell over stdin/stdout
fn main() -> ExitCode {
    let log_filter = logging::init();

    let settings_store = SettingsStore::load();
    let settings = settings_store.settings();
    log_filter.apply(&settings.log_filter);
    tracing::info!(
        "settings loaded from {:?}",
        settings_store.config_path()
    );

    let view = match bootstrap(&settings) {
        Ok(view) => view,
        Err(error) => {
            tracing::error!("failed to start: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut shell = ChatAppShell::new(view, io::stdout().lock());
    match shell.run(io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("shell stopped: {error}");
            ExitCode::FAILURE
        }
    }
}
