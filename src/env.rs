use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A source of named string values, resolved on every call.
pub trait Environment {
  /// Returns the value of `name`, or `None` when it is not set.
  fn lookup(&self, name: &str) -> Option<String>;

  fn contains(&self, name: &str) -> bool {
    self.lookup(name).is_some()
  }

  fn lookup_or(&self, name: &str, default: &str) -> String {
    self.lookup(name).unwrap_or_else(|| default.to_owned())
  }
}

impl<E: Environment + ?Sized> Environment for &E {
  fn lookup(&self, name: &str) -> Option<String> {
    (**self).lookup(name)
  }

  fn contains(&self, name: &str) -> bool {
    (**self).contains(name)
  }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
  fn lookup(&self, name: &str) -> Option<String> {
    (**self).lookup(name)
  }

  fn contains(&self, name: &str) -> bool {
    (**self).contains(name)
  }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
  fn lookup(&self, name: &str) -> Option<String> {
    (**self).lookup(name)
  }

  fn contains(&self, name: &str) -> bool {
    (**self).contains(name)
  }
}

/// The environment of the current process.
///
/// Values that are not valid unicode are returned lossily, so converters
/// still see (and reject) them.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
  fn lookup(&self, name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
  }
}

/// An in-memory environment.
///
/// Mutation goes through `&self` so an environment shared with guards can
/// still be changed between calls.
#[derive(Debug, Default)]
pub struct MapEnv {
  vars: RwLock<HashMap<String, String>>,
}

impl MapEnv {
  pub fn new() -> MapEnv {
    MapEnv::default()
  }

  pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
    self
      .vars
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(name.into(), value.into());
  }

  pub fn remove(&self, name: &str) -> Option<String> {
    self
      .vars
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .remove(name)
  }

  pub fn clear(&self) {
    self.vars.write().unwrap_or_else(PoisonError::into_inner).clear();
  }
}

impl Environment for MapEnv {
  fn lookup(&self, name: &str) -> Option<String> {
    self
      .vars
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(name)
      .cloned()
  }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let vars = iter
      .into_iter()
      .map(|(name, value)| (name.into(), value.into()))
      .collect();

    MapEnv {
      vars: RwLock::new(vars),
    }
  }
}

#[cfg(test)]
mod env {
  use super::{Environment, MapEnv, SystemEnv};

  #[cfg(test)]
  mod map_env {
    use super::{Environment, MapEnv};

    #[test]
    fn lookup_set_variable() {
      let env: MapEnv = [("SOME_VAR", "value")].into_iter().collect();

      assert_eq!(env.lookup("SOME_VAR"), Some(String::from("value")));
      assert_eq!(env.lookup("ANOTHER_VAR"), None);
    }

    #[test]
    fn empty_value_is_present() {
      let env = MapEnv::new();
      env.set("SOME_VAR", "");

      assert_eq!(env.contains("SOME_VAR"), true);
    }

    #[test]
    fn lookup_or_substitutes_default() {
      let env = MapEnv::new();

      assert_eq!(env.lookup_or("SOME_VAR", "fallback"), "fallback");

      env.set("SOME_VAR", "value");

      assert_eq!(env.lookup_or("SOME_VAR", "fallback"), "value");
    }

    #[test]
    fn remove_and_clear() {
      let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();

      assert_eq!(env.remove("A"), Some(String::from("1")));
      assert_eq!(env.contains("A"), false);

      env.clear();

      assert_eq!(env.contains("B"), false);
    }

    #[test]
    fn lookup_through_reference() {
      let env: MapEnv = [("SOME_VAR", "value")].into_iter().collect();
      let by_ref = &env;

      assert_eq!(by_ref.lookup("SOME_VAR"), Some(String::from("value")));
    }
  }

  #[cfg(test)]
  mod system_env {
    use super::{Environment, SystemEnv};
    use crate::checkers::Checkers;
    use crate::error::{CheckError, EnvError};
    use crate::getters::Getters;

    #[test]
    fn lookup_process_variable() {
      std::env::set_var("ENVA_TEST_SYSTEM_LOOKUP", "value");

      assert_eq!(SystemEnv.lookup("ENVA_TEST_SYSTEM_LOOKUP"), Some(String::from("value")));
      assert_eq!(SystemEnv.contains("ENVA_TEST_SYSTEM_LOOKUP"), true);
      assert_eq!(SystemEnv.contains("ENVA_TEST_SYSTEM_UNSET"), false);
    }

    #[test]
    fn empty_value_is_present() {
      std::env::set_var("ENVA_TEST_SYSTEM_EMPTY", "");

      assert_eq!(SystemEnv.lookup("ENVA_TEST_SYSTEM_EMPTY"), Some(String::new()));
      assert!(SystemEnv.variable_exists("ENVA_TEST_SYSTEM_EMPTY"));
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_value_is_set_and_rejected() {
      use std::ffi::OsStr;
      use std::os::unix::ffi::OsStrExt;

      std::env::set_var("ENVA_TEST_SYSTEM_NON_UNICODE", OsStr::from_bytes(b"\xff10"));
      std::env::set_var("ENVA_TEST_SYSTEM_SECONDARY", "secondary");

      let name = "ENVA_TEST_SYSTEM_NON_UNICODE";
      let lossy = Some(String::from("\u{FFFD}10"));

      assert!(SystemEnv.variable_exists(name));
      assert_eq!(SystemEnv.lookup(name), lossy);
      assert_eq!(
        SystemEnv.get_int(name, Some(5), true),
        Err(EnvError::invalid(name, lossy.clone()))
      );
      assert_eq!(
        SystemEnv.get_int(name, None, true),
        Err(EnvError::invalid(name, lossy.clone()))
      );
      assert_eq!(SystemEnv.get_int(name, Some(5), false), Ok(None));
      assert_eq!(
        SystemEnv.get_with_fallback(name, "ENVA_TEST_SYSTEM_SECONDARY"),
        lossy
      );
      assert!(matches!(
        SystemEnv.require_variable_as_type(name, |v| v.parse::<i64>()),
        Err(CheckError::Conversion(_))
      ));
    }
  }
}
