use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EnvError {
  #[error("{name} environment variable is not set")]
  MissingVariable { name: String },
  #[error("{name} variable is not a valid type. Value: {}", display_value(.value))]
  InvalidType { name: String, value: Option<String> },
}

impl EnvError {
  pub fn missing(name: &str) -> EnvError {
    EnvError::MissingVariable { name: name.into() }
  }

  pub fn invalid(name: &str, value: Option<String>) -> EnvError {
    EnvError::InvalidType {
      name: name.into(),
      value,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      EnvError::MissingVariable { name } | EnvError::InvalidType { name, .. } => name,
    }
  }
}

fn display_value(value: &Option<String>) -> &str {
  value.as_deref().unwrap_or("<unset>")
}

/// Failure of a typed existence check.
///
/// Converter errors are carried as produced, so callers can tell an unset
/// variable apart from a value their converter rejected.
#[derive(Debug, Error, PartialEq)]
pub enum CheckError<E> {
  #[error(transparent)]
  Env(#[from] EnvError),
  #[error(transparent)]
  Conversion(E),
}

impl<E> CheckError<E> {
  pub fn conversion(&self) -> Option<&E> {
    match self {
      CheckError::Conversion(err) => Some(err),
      CheckError::Env(_) => None,
    }
  }
}
