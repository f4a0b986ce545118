//! Configuration for ecascade itself.
//!
//! This module provides:
//! - Loading configuration from `ecascade.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config, ConfigError, CONFIG_FILENAME};
pub use init::{generate_init_file, generate_init_file_in, ECASCADE_TOML_TEMPLATE};
pub use merge::{merge_resolve_config, CliResolveOptions, ResolveConfig};
pub use toml_schema::{EcascadeToml, ResolveSection};
