//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{self, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use crate::{config, Level};

/// Keeps the non-blocking log writers alive; logs are flushed when it is dropped.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
/// Fails if a global subscriber has already been installed for this process.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> Result<TelemetryGuard, TryInitError> {
    let mut guards = Vec::new();

    let file_layer = if conf.file.enabled {
        let mut path = crate::env::workspace_path();
        path.push(&conf.file.path);
        let file_appender = tracing_appender::rolling::hourly(&path, &conf.file.file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_filter = filter::Targets::new().with_default(conf.file.level.into_level());
        Some(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(file_writer)
                .with_filter(file_filter),
        )
    } else {
        None
    };

    // `RUST_LOG` overrides the config settings unless a directive is configured explicitly
    let env_filter = EnvFilter::builder().with_default_directive(LevelFilter::TRACE.into());
    let env_filter = match conf.console.filtering_directive.as_deref() {
        Some(directive) => env_filter.parse_lossy(directive),
        None => env_filter.from_env_lossy(),
    };

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter);

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let level = conf.console.level.into_level();
        let mut console_filter = filter::Targets::new().with_default(Level::WARN);
        for acrate in crates_to_watch {
            console_filter = console_filter.with_target(acrate.as_ref(), level);
        }

        match conf.console.log_format {
            config::LogFormat::Default => {
                let logging_layer = fmt::layer()
                    .with_span_events(fmt::format::FmtSpan::ACTIVE)
                    .pretty()
                    .with_writer(console_writer);

                subscriber
                    .with(logging_layer.with_filter(console_filter))
                    .try_init()?;
            }
            config::LogFormat::Json => {
                let logging_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(console_writer);

                subscriber
                    .with(logging_layer.with_filter(console_filter))
                    .try_init()?;
            }
        }
    } else {
        subscriber.try_init()?;
    };

    tracing::debug!(
        service = service_name,
        env = %crate::env::which(),
        "Logging subsystem initialised"
    );

    // Returning the WorkerGuard for logs to be printed until it is dropped
    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}
