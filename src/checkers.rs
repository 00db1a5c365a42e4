use crate::env::Environment;
use crate::error::{CheckError, EnvError};

pub trait Checkers: Environment {
  /// The empty string counts as set.
  fn variable_exists(&self, name: &str) -> bool {
    self.contains(name)
  }

  fn require_variable_exists(&self, name: &str) -> Result<(), EnvError> {
    if !self.variable_exists(name) {
      debug!("{} environment variable is not set", name);

      return Err(EnvError::missing(name));
    }

    Ok(())
  }

  /// Requires `name` to be set and accepted by `convert`.
  ///
  /// Errors from `convert` are returned as [`CheckError::Conversion`] without
  /// being reinterpreted.
  fn require_variable_as_type<T, E, F>(&self, name: &str, convert: F) -> Result<(), CheckError<E>>
  where
    F: FnOnce(&str) -> Result<T, E>,
  {
    self.require_variable_exists(name)?;

    // Re-read: the variable may have been removed since the existence check.
    let value = self.lookup(name).ok_or_else(|| EnvError::missing(name))?;

    convert(&value).map_err(CheckError::Conversion)?;

    Ok(())
  }
}

impl<E: Environment + ?Sized> Checkers for E {}
