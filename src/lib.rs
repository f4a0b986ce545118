//! Resolve the EditorConfig settings that apply to a file.
//!
//! Configuration files are parsed into an [`EditorConfig`] model and combined
//! by the [`Resolver`], walking from the file's directory up to a root.

pub mod colors;
pub mod config;
pub mod error;
pub mod glob;
pub mod model;
pub mod option_types;
mod output;
pub mod parser;
pub mod progress;
pub mod provider;
pub mod resolver;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_resolve_config, CliResolveOptions,
    ConfigError, EcascadeToml, ResolveConfig, ResolveSection, ECASCADE_TOML_TEMPLATE,
};
pub use error::{GlobError, OptionError, ParseError, ParseErrorKind, ResolveError, Severity};
pub use glob::GlobMatcher;
pub use model::{EditorConfig, EditorOption, Section, DEFAULT_VERSION};
pub use option_types::{OptionType, OptionTypeRegistry, OptionValue, ValueKind};
pub use output::{format_diff, format_resolved, print_diff, OutputContext, OutputMode, RunResult};
pub use parser::{load_editorconfig, parse_editorconfig, EditorConfigHandler, ParseOutcome};
pub use progress::ProgressReporter;
pub use provider::{FsResourceProvider, ResourceProvider};
pub use resolver::{Resolver, ResolverSettings, DEFAULT_CONFIG_FILENAME};
pub use walker::walk_targets;

use std::io;
use std::path::{Component, Path, PathBuf};

/// Install the stderr log subscriber.
///
/// `ECASCADE_LOG` takes `RUST_LOG` style directives. Without it only
/// warnings are shown, debug output with `verbose`, nothing with `quiet`.
pub fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_env("ECASCADE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive(verbose, quiet)));

    // A second call keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .try_init();
}

fn default_log_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "ecascade=off"
    } else if verbose {
        "ecascade=debug"
    } else {
        "ecascade=warn"
    }
}

/// Make `path` absolute against the working directory.
///
/// `.` parts are dropped and `..` parts remove the preceding component, so
/// the result compares equal to the parents of other absolutized paths.
/// Symlinks are not resolved.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Main entry point: resolve and print the settings of every target.
pub fn run(paths: &[String], config: &ResolveConfig, ctx: &OutputContext) -> io::Result<RunResult> {
    let registry = OptionTypeRegistry::builtin();
    let resolver = Resolver::new(FsResourceProvider, &registry).with_settings(config.settings.clone());
    let roots = config
        .root_dirs
        .iter()
        .map(|dir| absolutize(dir))
        .collect::<io::Result<Vec<_>>>()?;

    let targets = walk_targets(paths)
        .into_iter()
        .collect::<io::Result<Vec<_>>>()?;
    let with_header = targets.len() > 1;

    let mut result = RunResult::default();
    let progress = ProgressReporter::new(targets.len() as u64, ctx.show_progress);

    for target in &targets {
        if let Some(name) = target.file_name() {
            progress.set_message(&name.to_string_lossy());
        }

        match resolver.resolve(&absolutize(target)?, &roots) {
            Ok(options) => {
                result.files_resolved += 1;
                result.invalid_options += options.iter().filter(|o| !o.is_valid()).count();
                progress.suspend(|| output::print_resolved(target, &options, with_header, ctx));
            }
            Err(e) => {
                result.files_failed += 1;
                progress.suspend(|| output::print_error(target, &e, ctx));
            }
        }

        progress.inc();
    }

    progress.finish();

    output::print_summary(&result, ctx);

    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderMode {
    /// Print the canonical text
    Print,
    /// Print a diff from the file to its canonical text
    Diff,
    /// Only report whether the file is canonical
    Check,
}

/// Parse one configuration file and render it back in canonical form.
///
/// Returns whether the file already was canonical.
pub fn render_file(
    path: &Path,
    config: &ResolveConfig,
    mode: RenderMode,
    ctx: &OutputContext,
) -> io::Result<bool> {
    let registry = OptionTypeRegistry::builtin();
    let original = std::fs::read_to_string(path)?;
    let outcome = load_editorconfig(&absolutize(path)?, &registry, &config.settings.version)?;

    for error in &outcome.errors {
        output::print_parse_error(path, error, ctx);
    }

    let rendered = outcome.config.to_string();
    let canonical = original == rendered;

    match mode {
        RenderMode::Print => print!("{rendered}"),
        RenderMode::Diff => {
            if !canonical {
                print_diff(&path.display().to_string(), &original, &rendered);
            }
        }
        RenderMode::Check => {
            if !canonical {
                output::print_not_canonical(path, ctx);
            }
        }
    }

    Ok(canonical)
}
