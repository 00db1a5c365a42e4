use std::fmt;
use std::panic::{RefUnwindSafe, UnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, DateFrom, FileLimit};
use file_rotate::{ContentLimit, FileRotate};
use lazy_static::lazy_static;
use slog::Drain;
use thiserror::Error;

use crate::config::LoggingConfig;
use crate::env::Environment;
use crate::error::EnvError;

lazy_static! {
  static ref LOG_GUARD: Arc<Mutex<Option<LoggingGuard>>> = Arc::new(Mutex::new(None));
}

pub struct LoggingGuard {
  _scope_guard: slog_scope::GlobalLoggerGuard,
}

#[derive(Debug, Error)]
pub enum LoggingError {
  #[error("Logging is already initialized")]
  AlreadyInitialized,
  #[error(transparent)]
  Env(#[from] EnvError),
  #[error(transparent)]
  SetLogger(#[from] log::SetLoggerError),
}

fn term_drain() -> slog::Fuse<slog_async::Async> {
  let decorator = slog_term::TermDecorator::new().build();
  let drain = slog_term::FullFormat::new(decorator).build().fuse();
  slog_async::Async::new(drain).build().fuse()
}

fn file_drain(log_file: &str) -> slog::Fuse<slog_async::Async> {
  let file = FileRotate::new(
    log_file,
    AppendTimestamp::with_format("%Y%m%d", FileLimit::MaxFiles(5), DateFrom::DateYesterday),
    ContentLimit::Bytes(100_000_000),
    Compression::OnRotate(2),
    #[cfg(unix)]
    None,
  );

  let decorator = slog_term::PlainDecorator::new(file);
  let drain = slog_term::FullFormat::new(decorator).build().fuse();
  slog_async::Async::new(drain).build().fuse()
}

fn set_global_logger<D>(drain: D, level: slog::Level) -> slog_scope::GlobalLoggerGuard
where
  D: Drain + Send + Sync + RefUnwindSafe + UnwindSafe + 'static,
  D::Err: fmt::Debug,
{
  let values = slog_o!("place" =>
    slog::FnValue(move |info| {
      format!(
        "{}:{} {}",
        info.file(),
        info.line(),
        info.module(),
      )
    })
  );

  let drain = slog::LevelFilter::new(drain, level).fuse();
  let logger = slog::Logger::root(drain, values);

  slog_scope::set_global_logger(logger)
}

/// Installs the global logger described by `config` and routes the `log`
/// facade into it. Nothing is installed when neither stdout nor a file is
/// configured, and a logger can only be installed once.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
  let mut log_guard = LOG_GUARD.lock().unwrap_or_else(PoisonError::into_inner);

  if log_guard.is_some() {
    return Err(LoggingError::AlreadyInitialized);
  }

  let _scope_guard = match (&config.log_file, config.log_to_stdout) {
    (None, true) => Some(set_global_logger(term_drain(), config.log_level)),
    (Some(log_file), false) => Some(set_global_logger(file_drain(log_file), config.log_level)),
    (Some(log_file), true) => {
      let drain = slog::Duplicate(term_drain(), file_drain(log_file)).fuse();
      Some(set_global_logger(drain, config.log_level))
    }
    (None, false) => None,
  };

  if let Some(_scope_guard) = _scope_guard {
    // The scope guard is kept even if the `log` bridge fails.
    *log_guard = Some(LoggingGuard { _scope_guard });

    slog_stdlog::init()?;

    info!("log_level: {}", config.log_level);
    info!("log_file: {:?}", &config.log_file);
    info!("log_to_stdout: {}", config.log_to_stdout);
  }

  Ok(())
}

/// Loads a [`LoggingConfig`] with [`LoggingConfig::from_env`] and installs it.
pub fn init_from_env<E: Environment + ?Sized>(env: &E, prefix: &str) -> Result<(), LoggingError> {
  let config = LoggingConfig::from_env(env, prefix)?;

  init(&config)
}

pub fn initialized() -> bool {
  LOG_GUARD
    .lock()
    .unwrap_or_else(PoisonError::into_inner)
    .is_some()
}

#[cfg(test)]
mod logging {
  use super::{init, init_from_env, initialized, LoggingError};
  use crate::config::LoggingConfig;
  use crate::env::MapEnv;

  // Installation is process-wide, so the whole lifecycle runs in one test.
  #[test]
  fn init_lifecycle() {
    let disabled = LoggingConfig {
      log_to_stdout: false,
      log_file: None,
      log_level: slog::Level::Debug,
    };

    assert!(init(&disabled).is_ok());
    assert_eq!(initialized(), false);

    let env: MapEnv = [("APP_LOG_LEVEL", "loud")].into_iter().collect();

    assert!(matches!(init_from_env(&env, "APP"), Err(LoggingError::Env(_))));
    assert_eq!(initialized(), false);

    let stdout = LoggingConfig {
      log_to_stdout: true,
      log_file: None,
      log_level: slog::Level::Debug,
    };

    assert!(init(&stdout).is_ok());
    assert_eq!(initialized(), true);

    debug!("logging initialized");

    assert!(matches!(init(&stdout), Err(LoggingError::AlreadyInitialized)));
    assert!(matches!(init(&disabled), Err(LoggingError::AlreadyInitialized)));
    assert_eq!(initialized(), true);
  }
}
