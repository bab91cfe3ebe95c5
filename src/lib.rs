#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::ProjectConfig;
pub use core::{CffFile, CFF_FILENAME};
pub use domain::{
    classify, Citant, DateInput, Entity, FieldValue, Model, Person, ALLOWED_FIELDS,
    DEFAULT_MESSAGE, DEFAULT_SPEC_VERSION,
};
pub use utils::error::{CffError, Result};
