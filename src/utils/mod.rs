pub mod persistence;

use std::{env, path::PathBuf, sync::Once};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const HOME_ENV: &str = "FINANCE_CORE_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("finance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
