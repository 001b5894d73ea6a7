//! This crate implements functionality around scenario configuration:
//!
//! * Loading of the configuration from a YAML file. Defaults are used if the
//!   file does not exist.
//!
//! * Parsing and validation of the configuration.

mod conf;
mod io;
mod persisted;

pub use conf::*;
pub use io::{default_conf_path, load_conf};
