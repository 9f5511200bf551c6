use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "shopscope.log";

/// Builds the subscriber without installing it.
///
/// `RUST_LOG` takes precedence over `settings.level`. Console output goes to
/// stderr through the progress layer, so log lines and spinners drawn for
/// entered spans do not overwrite each other; stdout stays clean for
/// reports. When `settings.directory` is set, a daily rolling file is
/// written as well.
pub fn build_subscriber(
    settings: &LoggingSettings,
) -> Result<(impl Subscriber + Send + Sync + 'static, Option<WorkerGuard>), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| {
            ConfigError::LoggingError(format!("invalid level {:?}: {}", settings.level, e))
        })?,
    };

    let progress_layer = IndicatifLayer::new();
    let console_layer = fmt::layer()
        .with_writer(progress_layer.get_stderr_writer())
        .with_target(false);

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .with(progress_layer);

    Ok((subscriber, guard))
}

/// Installs the global tracing subscriber built by `build_subscriber`.
///
/// Keep the returned guard alive for as long as file logs should be flushed.
pub fn init_logging(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let (subscriber, guard) = build_subscriber(settings)?;
    subscriber
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{info, info_span};

    #[test]
    fn test_invalid_level_is_a_logging_error() {
        // Only meaningful when RUST_LOG does not override the level.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let settings = LoggingSettings {
            level: "shopscope=verbose".to_string(),
            directory: None,
        };
        assert!(matches!(
            build_subscriber(&settings),
            Err(ConfigError::LoggingError(_))
        ));
    }

    #[test]
    fn test_events_inside_a_progress_span_are_accepted() {
        let (subscriber, guard) = build_subscriber(&LoggingSettings::default()).unwrap();
        assert!(guard.is_none());

        let value = tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("load");
            span.in_scope(|| {
                info!(rows = 3, "inside a progress span");
                3
            })
        });
        assert_eq!(value, 3);
    }
}
