use crate::config::{AppEnvironment, TelemetryConfig};
use std::fmt;
use tracing::info;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Resolves the active filter: an explicit `RUST_LOG` wins, otherwise the
/// configured level applies across the engine.
fn resolve_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source,
            })
        }
    }
}

/// ANSI colour is a local-development convenience; collected logs stay plain.
const fn ansi_enabled(environment: AppEnvironment) -> bool {
    matches!(environment, AppEnvironment::Development)
}

pub fn init(environment: AppEnvironment, config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = resolve_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(ansi_enabled(environment))
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    info!(?environment, level = %config.log_level, "qualification engine telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn ansi_is_reserved_for_development() {
        assert!(ansi_enabled(AppEnvironment::Development));
        assert!(!ansi_enabled(AppEnvironment::Test));
        assert!(!ansi_enabled(AppEnvironment::Production));
    }

    #[test]
    fn invalid_configured_level_is_reported() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("RUST_LOG");
        let config = TelemetryConfig {
            log_level: "definitely not a directive".to_string(),
        };

        match resolve_filter(&config) {
            Err(TelemetryError::EnvFilter { value, .. }) => {
                assert_eq!(value, config.log_level);
            }
            Err(other) => panic!("expected env-filter error, got {other:?}"),
            Ok(_) => panic!("expected env-filter error, got a filter"),
        }
    }

    #[test]
    fn rust_log_takes_precedence_over_the_configured_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("RUST_LOG", "warn");
        let config = TelemetryConfig {
            log_level: "definitely not a directive".to_string(),
        };

        let resolved = resolve_filter(&config);
        env::remove_var("RUST_LOG");
        assert!(resolved.is_ok());
    }
}
