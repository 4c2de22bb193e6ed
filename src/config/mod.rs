//! Generator configuration.
//!
//! Settings come from built-in defaults, an optional `.misura.toml` found by
//! walking up from the working directory, and finally the command line.

mod core;
mod loader;
pub mod metrics;

pub use self::core::{
    GeneratorConfig, MisuraConfig, SaltPolicy, DEFAULT_SUFFIX, FILE_ENV_VAR,
};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
pub use metrics::{select_metrics, MetricFlags, MetricSet};
