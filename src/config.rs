use smart_default::SmartDefault;

use crate::env::Environment;
use crate::error::EnvError;
use crate::getters::Getters;
use crate::serde::{default_true, deserialize_log_level, str_to_log_level};

pub fn clap_arg_to_log_level(level: &str) -> Result<slog::Level, String> {
  str_to_log_level(Some(level)).map_err(|_| String::from("Failed to parse log level."))
}

#[derive(Clone, Debug, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct LoggingConfig {
  #[default = true]
  #[serde(default = "default_true")]
  pub log_to_stdout: bool,
  pub log_file: Option<String>,
  #[default(_code = "slog::Level::Info")]
  #[serde(deserialize_with = "deserialize_log_level")]
  pub log_level: slog::Level,
}

impl LoggingConfig {
  /// Reads `{prefix}_LOG_LEVEL`, `{prefix}_LOG_FILE` and `{prefix}_LOG_TO_STDOUT`.
  ///
  /// Unset variables keep their defaults, an empty `{prefix}_LOG_FILE` counts
  /// as unset.
  pub fn from_env<E: Environment + ?Sized>(
    env: &E,
    prefix: &str,
  ) -> Result<LoggingConfig, EnvError> {
    let defaults = LoggingConfig::default();

    let log_level = env
      .get_as(
        &format!("{prefix}_LOG_LEVEL"),
        Some(defaults.log_level),
        true,
        |level| str_to_log_level(Some(level)),
      )?
      .unwrap_or(defaults.log_level);

    let log_file = env
      .lookup(&format!("{prefix}_LOG_FILE"))
      .filter(|v| !v.is_empty())
      .or(defaults.log_file);

    let log_to_stdout = env
      .get_bool(&format!("{prefix}_LOG_TO_STDOUT"), Some(defaults.log_to_stdout), true)?
      .unwrap_or(defaults.log_to_stdout);

    Ok(LoggingConfig {
      log_to_stdout,
      log_file,
      log_level,
    })
  }
}
