use crate::colors::Colors;
use crate::error::{ParseError, Severity};
use crate::model::EditorOption;
use similar::{ChangeTag, TextDiff};
use std::fmt::{self, Write as _};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub verbose: bool,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool, show_progress: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
            show_progress,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunResult {
    pub files_resolved: usize,
    pub files_failed: usize,
    pub invalid_options: usize,
}

impl RunResult {
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Format the settings resolved for one file as `name=value` lines.
///
/// Quiet mode leaves out invalid options; verbose mode flags them.
pub fn format_resolved(
    path: &Path,
    options: &[EditorOption],
    with_header: bool,
    ctx: &OutputContext,
) -> String {
    let colors = &ctx.colors;
    let mut out = String::new();

    if with_header {
        let _ = writeln!(out, "{}[{}]{}", colors.header, path.display(), colors.reset());
    }

    for option in options {
        if !option.is_valid() && ctx.mode == OutputMode::Quiet {
            continue;
        }
        let _ = write!(
            out,
            "{}{}{}={}",
            colors.name,
            option.name(),
            colors.reset(),
            option.source_value()
        );
        if !option.is_valid() && ctx.verbose {
            let _ = write!(out, " {}(invalid){}", colors.invalid, colors.reset());
        }
        out.push('\n');
    }

    out
}

pub fn print_resolved(path: &Path, options: &[EditorOption], with_header: bool, ctx: &OutputContext) {
    print!("{}", format_resolved(path, options, with_header, ctx));
}

pub fn print_error(path: &Path, error: &dyn fmt::Display, ctx: &OutputContext) {
    eprintln!(
        "{}Error:{} {}: {error}",
        ctx.colors.error,
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_parse_error(path: &Path, error: &ParseError, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        return;
    }
    let color = match error.severity() {
        Severity::Error => ctx.colors.error,
        Severity::Warning => ctx.colors.warning,
    };
    eprintln!(
        "{color}{}:{} {}: {error}",
        error.severity(),
        ctx.colors.reset(),
        path.display()
    );
}

pub fn print_not_canonical(path: &Path, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet {
        println!("{}", path.display());
        return;
    }
    println!(
        "{}Not canonical:{} {}",
        ctx.colors.warning,
        ctx.colors.reset(),
        path.display()
    );
}

/// Unified diff of `original` against `content`, three lines of context.
pub fn format_diff(label: &str, original: &str, content: &str) -> String {
    let diff = TextDiff::from_lines(original, content);
    let mut out = String::new();

    let _ = writeln!(out, "--- {label}");
    let _ = writeln!(out, "+++ {label}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                let _ = write!(out, "{sign}{change}");
                if change.missing_newline() {
                    out.push('\n');
                }
            }
        }
    }

    out
}

pub fn print_diff(label: &str, original: &str, content: &str) {
    print!("{}", format_diff(label, original, content));
}

pub fn print_summary(result: &RunResult, ctx: &OutputContext) {
    if ctx.mode == OutputMode::Quiet || !ctx.verbose {
        return;
    }

    let mut parts = vec![format!("{} files resolved", result.files_resolved)];
    if result.invalid_options > 0 {
        parts.push(format!(
            "{}{} invalid options{}",
            ctx.colors.warning,
            result.invalid_options,
            ctx.colors.reset()
        ));
    }
    if result.files_failed > 0 {
        parts.push(format!(
            "{}{} files failed{}",
            ctx.colors.error,
            result.files_failed,
            ctx.colors.reset()
        ));
    }
    eprintln!("{}", parts.join(", "));
}
