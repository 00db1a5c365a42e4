use std::marker::PhantomData;

use crate::checkers::Checkers;
use crate::env::Environment;
use crate::error::{CheckError, EnvError};

/// A precondition checked before a wrapped callable runs.
pub trait Guard {
  type Error;

  fn check(&self) -> Result<(), Self::Error>;

  fn wrap<F>(self, inner: F) -> Guarded<Self, F>
  where
    Self: Sized,
  {
    Guarded::new(self, inner)
  }
}

/// Requires a variable to be set.
#[derive(Clone, Debug)]
pub struct RequiredVariable<E> {
  env: E,
  name: String,
}

impl<E: Environment> Guard for RequiredVariable<E> {
  type Error = EnvError;

  fn check(&self) -> Result<(), EnvError> {
    self.env.require_variable_exists(&self.name)
  }
}

/// Requires a variable to be set and accepted by a converter.
#[derive(Clone, Debug)]
pub struct RequiredTypedVariable<E, F, T, CE> {
  env: E,
  name: String,
  convert: F,
  _converts: PhantomData<fn() -> (T, CE)>,
}

impl<E, F, T, CE> Guard for RequiredTypedVariable<E, F, T, CE>
where
  E: Environment,
  F: Fn(&str) -> Result<T, CE>,
{
  type Error = CheckError<CE>;

  fn check(&self) -> Result<(), CheckError<CE>> {
    self.env.require_variable_as_type(&self.name, &self.convert)
  }
}

pub fn with_required_variable<E: Environment>(env: E, name: &str) -> RequiredVariable<E> {
  RequiredVariable {
    env,
    name: name.into(),
  }
}

pub fn with_required_typed_variable<E, F, T, CE>(
  env: E,
  name: &str,
  convert: F,
) -> RequiredTypedVariable<E, F, T, CE>
where
  E: Environment,
  F: Fn(&str) -> Result<T, CE>,
{
  RequiredTypedVariable {
    env,
    name: name.into(),
    convert,
    _converts: PhantomData,
  }
}

/// A callable that runs its guard on every invocation.
///
/// The inner callable is only invoked once the guard passes, and its return
/// value is handed back untouched. Several arguments are forwarded as a tuple.
#[derive(Clone, Debug)]
pub struct Guarded<G, F> {
  guard: G,
  inner: F,
}

impl<G: Guard, F> Guarded<G, F> {
  pub fn new(guard: G, inner: F) -> Guarded<G, F> {
    Guarded { guard, inner }
  }

  pub fn invoke<R>(&self) -> Result<R, G::Error>
  where
    F: Fn() -> R,
  {
    self.guard.check()?;

    Ok((self.inner)())
  }

  pub fn call<A, R>(&self, args: A) -> Result<R, G::Error>
  where
    F: Fn(A) -> R,
  {
    self.guard.check()?;

    Ok((self.inner)(args))
  }

  pub fn call_mut<A, R>(&mut self, args: A) -> Result<R, G::Error>
  where
    F: FnMut(A) -> R,
  {
    self.guard.check()?;

    Ok((self.inner)(args))
  }

  pub fn guard(&self) -> &G {
    &self.guard
  }

  pub fn into_inner(self) -> F {
    self.inner
  }
}
