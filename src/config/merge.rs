//! Configuration merging logic
//!
//! Priority: CLI args > ecascade.toml > defaults

use std::path::{Path, PathBuf};

use crate::resolver::ResolverSettings;

use super::toml_schema::ResolveSection;

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliResolveOptions {
    pub config_filename: Option<String>,
    pub version: Option<String>,
    /// Empty when no `--root-dir` was given
    pub root_dirs: Vec<PathBuf>,
}

/// Everything a resolution run needs besides the targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveConfig {
    pub settings: ResolverSettings,
    pub root_dirs: Vec<PathBuf>,
}

/// Merge configurations from CLI, TOML, and defaults.
///
/// Relative `root_dirs` from the TOML file are taken relative to `toml_dir`.
pub fn merge_resolve_config(
    cli: &CliResolveOptions,
    toml: Option<&ResolveSection>,
    toml_dir: &Path,
) -> ResolveConfig {
    let defaults = ResolverSettings::default();

    let root_dirs = if cli.root_dirs.is_empty() {
        toml.and_then(|t| t.root_dirs_relative_to(toml_dir))
            .unwrap_or_default()
    } else {
        cli.root_dirs.clone()
    };

    ResolveConfig {
        settings: ResolverSettings {
            config_filename: cli
                .config_filename
                .clone()
                .or_else(|| toml.and_then(|t| t.config_filename.clone()))
                .unwrap_or(defaults.config_filename),
            version: cli
                .version
                .clone()
                .or_else(|| toml.and_then(|t| t.version.clone()))
                .unwrap_or(defaults.version),
        },
        root_dirs,
    }
}
