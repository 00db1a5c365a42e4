use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::env::Environment;
use crate::error::EnvError;

/// Outcome of resolving a variable against a converter.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved<T> {
  /// The variable was set and converted.
  Converted(T),
  /// The variable was unset and the caller's default was used.
  Defaulted(T),
  /// The variable was unset and no default was given.
  Unset,
  /// The variable was set but the converter rejected it.
  Invalid { raw: String },
}

impl<T> Resolved<T> {
  pub fn value(self) -> Option<T> {
    match self {
      Resolved::Converted(value) | Resolved::Defaulted(value) => Some(value),
      Resolved::Unset | Resolved::Invalid { .. } => None,
    }
  }

  /// Applies the strict-mode policy: when `strict`, anything that did not
  /// produce a value is an [`EnvError::InvalidType`].
  pub fn into_result(self, name: &str, strict: bool) -> Result<Option<T>, EnvError> {
    match self {
      Resolved::Converted(value) | Resolved::Defaulted(value) => Ok(Some(value)),
      Resolved::Unset if strict => Err(EnvError::invalid(name, None)),
      Resolved::Invalid { raw } if strict => Err(EnvError::invalid(name, Some(raw))),
      Resolved::Unset | Resolved::Invalid { .. } => Ok(None),
    }
  }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{value} is not a bool-like string")]
pub struct ParseBoolError {
  pub value: String,
}

/// Accepts `true`/`1` and `false`/`0`, ignoring case.
pub fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
  match value.to_lowercase().as_str() {
    "true" | "1" => Ok(true),
    "false" | "0" => Ok(false),
    _ => Err(ParseBoolError {
      value: value.to_owned(),
    }),
  }
}

fn parse_trimmed<T: FromStr>(value: &str) -> Result<T, T::Err> {
  value.trim().parse()
}

pub trait Getters: Environment {
  fn get_with_fallback(&self, primary: &str, secondary: &str) -> Option<String> {
    self.lookup(primary).or_else(|| self.lookup(secondary))
  }

  /// Returns the value of the first variable in `names` that is set.
  fn get_first(&self, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| self.lookup(name))
  }

  fn resolve<T, E, F>(&self, name: &str, default: Option<T>, convert: F) -> Resolved<T>
  where
    E: Display,
    F: FnOnce(&str) -> Result<T, E>,
  {
    let raw = match self.lookup(name) {
      Some(raw) => raw,
      None => {
        return match default {
          Some(default) => Resolved::Defaulted(default),
          None => {
            trace!("{} is not set and has no default", name);
            Resolved::Unset
          }
        };
      }
    };

    match convert(&raw) {
      Ok(value) => Resolved::Converted(value),
      Err(err) => {
        debug!("Failed to convert {} <{}>: {}", name, raw, err);
        Resolved::Invalid { raw }
      }
    }
  }

  fn get_as<T, E, F>(
    &self,
    name: &str,
    default: Option<T>,
    strict: bool,
    convert: F,
  ) -> Result<Option<T>, EnvError>
  where
    E: Display,
    F: FnOnce(&str) -> Result<T, E>,
  {
    self.resolve(name, default, convert).into_result(name, strict)
  }

  fn get_parsed<T>(
    &self,
    name: &str,
    default: Option<T>,
    strict: bool,
  ) -> Result<Option<T>, EnvError>
  where
    T: FromStr,
    T::Err: Display,
  {
    self.get_as(name, default, strict, parse_trimmed::<T>)
  }

  fn get_int(
    &self,
    name: &str,
    default: Option<i64>,
    strict: bool,
  ) -> Result<Option<i64>, EnvError> {
    self.get_parsed(name, default, strict)
  }

  fn get_float(
    &self,
    name: &str,
    default: Option<f64>,
    strict: bool,
  ) -> Result<Option<f64>, EnvError> {
    self.get_parsed(name, default, strict)
  }

  fn get_bool(
    &self,
    name: &str,
    default: Option<bool>,
    strict: bool,
  ) -> Result<Option<bool>, EnvError> {
    self.get_as(name, default, strict, parse_bool)
  }
}

impl<E: Environment + ?Sized> Getters for E {}
