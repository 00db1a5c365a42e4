#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive as _;
#[macro_use(slog_o)]
extern crate slog;

pub mod checkers;
pub mod config;
pub mod env;
pub mod error;
pub mod getters;
pub mod guard;
pub mod logging;
pub mod serde;

pub use checkers::Checkers;
pub use env::{Environment, MapEnv, SystemEnv};
pub use error::{CheckError, EnvError};
pub use getters::{parse_bool, Getters, Resolved};
pub use guard::{with_required_typed_variable, with_required_variable, Guard, Guarded};
