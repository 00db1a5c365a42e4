use serde::{de, Deserializer};
use thiserror::Error;

pub fn deserialize_log_level<'de, D>(de: D) -> Result<slog::Level, D::Error>
where
  D: Deserializer<'de>,
{
  let level: String = de::Deserialize::deserialize(de)?;
  str_to_log_level(Some(&level)).map_err(de::Error::custom)
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Invalid loglevel: {level}")]
pub struct LogLevelError {
  pub level: String,
}

pub fn str_to_log_level(level: Option<&str>) -> Result<slog::Level, LogLevelError> {
  match level {
    Some("critical") => Ok(slog::Level::Critical),
    Some("debug") => Ok(slog::Level::Debug),
    Some("error") => Ok(slog::Level::Error),
    Some("trace") => Ok(slog::Level::Trace),
    Some("warning") => Ok(slog::Level::Warning),
    Some("info") | None => Ok(slog::Level::Info),
    Some(level) => Err(LogLevelError {
      level: level.to_owned(),
    }),
  }
}

pub fn default_true() -> bool {
  true
}
