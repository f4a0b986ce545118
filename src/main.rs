use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ecascade::{
    find_config_file, generate_init_file, init_tracing, load_config, merge_resolve_config,
    render_file, run, should_use_colors, CliResolveOptions, EcascadeToml, OutputContext,
    OutputMode, RenderMode, ResolveConfig,
};

#[derive(Parser)]
#[command(name = "ecascade")]
#[command(version, about = "Print the EditorConfig settings that apply to files")]
struct Cli {
    /// Target files or directories
    #[arg(required_unless_present_any = ["init", "render"])]
    paths: Vec<String>,

    /// Never search above this directory (repeatable)
    #[arg(long = "root-dir", value_name = "DIR")]
    root_dirs: Vec<PathBuf>,

    /// Name of the configuration file looked up in each directory
    #[arg(short, long, value_name = "NAME")]
    filename: Option<String>,

    /// EditorConfig specification version the files follow
    #[arg(short = 'b', long = "ec-version", value_name = "VERSION")]
    ec_version: Option<String>,

    /// Print valid settings only, no messages
    #[arg(short, long)]
    quiet: bool,

    /// Mark invalid settings and log each configuration file used
    #[arg(short, long)]
    verbose: bool,

    /// Always use colors
    #[arg(long)]
    color: bool,

    /// Never use colors
    #[arg(long)]
    no_color: bool,

    /// Print a configuration file in canonical form instead of resolving
    #[arg(long, value_name = "FILE")]
    render: Option<PathBuf>,

    /// With --render, show the changes the canonical form makes
    #[arg(short, long, requires = "render")]
    diff: bool,

    /// With --render, exit 1 if the file is not in canonical form
    #[arg(short, long, requires = "render", conflicts_with = "diff")]
    check: bool,

    /// Generate a template ecascade.toml configuration file
    #[arg(long)]
    init: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    // Handle --init command
    if cli.init {
        return handle_init();
    }

    let config = load_resolve_config(&cli);

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let show_progress = !cli.quiet && io::stderr().is_terminal();
    let ctx = OutputContext::new(
        mode,
        should_use_colors(cli.color, cli.no_color),
        cli.verbose,
        show_progress,
    );

    if let Some(path) = &cli.render {
        return handle_render(path, &cli, &config, &ctx);
    }

    match run(&cli.paths, &config, &ctx) {
        Ok(result) => {
            if result.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn handle_render(path: &Path, cli: &Cli, config: &ResolveConfig, ctx: &OutputContext) -> ExitCode {
    let mode = if cli.check {
        RenderMode::Check
    } else if cli.diff {
        RenderMode::Diff
    } else {
        RenderMode::Print
    };

    match render_file(path, config, mode, ctx) {
        Ok(canonical) => {
            if mode == RenderMode::Check && !canonical {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            ExitCode::from(1)
        }
    }
}

/// Merge configurations: CLI > ecascade.toml > defaults
fn load_resolve_config(cli: &Cli) -> ResolveConfig {
    let toml_config = load_configuration(&cli.config, cli.quiet);
    let cli_options = build_cli_options(cli);

    match &toml_config {
        Some((toml, path)) => {
            let toml_dir = path.parent().unwrap_or_else(|| Path::new("."));
            merge_resolve_config(&cli_options, Some(&toml.resolve), toml_dir)
        }
        None => merge_resolve_config(&cli_options, None, Path::new(".")),
    }
}

fn load_configuration(explicit_path: &Option<PathBuf>, quiet: bool) -> Option<(EcascadeToml, PathBuf)> {
    let config_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_config_file(&d))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => {
            if !quiet {
                tracing::info!("using config {}", p.display());
            }
            Some((config, p))
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}

fn build_cli_options(cli: &Cli) -> CliResolveOptions {
    // Only set options that were explicitly provided on CLI
    CliResolveOptions {
        config_filename: cli.filename.clone(),
        version: cli.ec_version.clone(),
        root_dirs: cli.root_dirs.clone(),
    }
}
