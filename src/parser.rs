//! Reading `.editorconfig` text into the model
//!
//! [`parse_source`] is a line tokenizer that reports what it sees to an
//! [`EditorConfigHandler`]. [`ModelHandler`] is the handler that assembles an
//! [`EditorConfig`] from those events.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ParseError, ParseErrorKind};
use crate::model::{EditorConfig, EditorConfigBuilder, OptionDraft, SectionDraft};
use crate::option_types::OptionTypeRegistry;
use crate::provider::slash_path;

/// Receiver of tokenizer events.
///
/// Events nest as document > section > option. The text before the first
/// header is reported as a section that never receives a pattern.
pub trait EditorConfigHandler {
    fn start_document(&mut self) {}
    fn end_document(&mut self) {}
    fn start_section(&mut self);
    fn end_section(&mut self);
    fn end_pattern(&mut self, pattern: &str);
    fn start_option(&mut self);
    fn end_option_name(&mut self, name: &str);
    fn end_option_value(&mut self, value: &str);
    fn end_option(&mut self);
    fn error(&mut self, error: ParseError);
}

/// Tokenize `source`, reporting to `handler`.
///
/// Problems never abort the file: a malformed header drops that section
/// together with its option lines, a malformed option line drops the line.
pub fn parse_source<H: EditorConfigHandler + ?Sized>(source: &str, handler: &mut H) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    handler.start_document();
    handler.start_section();
    let mut section_open = true;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            if section_open {
                handler.end_section();
            }
            match section_pattern(line) {
                Some(pattern) => {
                    handler.start_section();
                    handler.end_pattern(pattern);
                    section_open = true;
                }
                None => {
                    handler.error(ParseError::new(
                        line_no,
                        ParseErrorKind::MalformedSection,
                        format!("section header `{line}` is missing its closing `]`"),
                    ));
                    section_open = false;
                }
            }
            continue;
        }

        // Lines of a dropped section go with it
        if !section_open {
            continue;
        }

        let Some(sep) = line.find(|c: char| c == '=' || c == ':') else {
            handler.error(ParseError::new(
                line_no,
                ParseErrorKind::MalformedLine,
                format!("expected `name = value`, found `{line}`"),
            ));
            continue;
        };

        let name = line[..sep].trim();
        let value = line[sep + 1..].trim();
        if name.is_empty() {
            handler.error(ParseError::new(
                line_no,
                ParseErrorKind::EmptyOptionName,
                "option has no name",
            ));
            continue;
        }

        handler.start_option();
        handler.end_option_name(name);
        handler.end_option_value(value);
        handler.end_option();
    }

    if section_open {
        handler.end_section();
    }
    handler.end_document();
}

fn section_pattern(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Where the model handler is in the document > section > option nesting.
#[derive(Debug, Default)]
enum State {
    #[default]
    Document,
    Section(SectionDraft),
    Option(SectionDraft, OptionDraft),
}

/// Builds an [`EditorConfig`] from tokenizer events, keeping every
/// recoverable problem it is told about.
#[derive(Debug)]
pub struct ModelHandler<'r> {
    builder: EditorConfigBuilder<'r>,
    state: State,
    errors: Vec<ParseError>,
}

impl<'r> ModelHandler<'r> {
    pub fn new(builder: EditorConfigBuilder<'r>) -> Self {
        Self {
            builder,
            state: State::Document,
            errors: Vec::new(),
        }
    }

    pub fn finish(mut self) -> ParseOutcome {
        self.close_section();
        ParseOutcome {
            config: self.builder.build(),
            errors: self.errors,
        }
    }

    fn close_section(&mut self) {
        let draft = match std::mem::take(&mut self.state) {
            State::Document => return,
            State::Section(draft) => draft,
            State::Option(mut draft, option) => {
                if let Some(option) = option.finish(self.builder.registry()) {
                    draft.add_option(option);
                }
                draft
            }
        };
        self.builder.close_section(draft);
    }
}

impl EditorConfigHandler for ModelHandler<'_> {
    fn end_document(&mut self) {
        self.close_section();
    }

    fn start_section(&mut self) {
        self.close_section();
        self.state = State::Section(SectionDraft::default());
    }

    fn end_section(&mut self) {
        self.close_section();
    }

    fn end_pattern(&mut self, pattern: &str) {
        if let State::Section(draft) = &mut self.state {
            draft.set_glob(self.builder.compile_glob(pattern));
        }
    }

    fn start_option(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            State::Section(draft) | State::Option(draft, _) => {
                State::Option(draft, OptionDraft::default())
            }
            State::Document => State::Document,
        };
    }

    fn end_option_name(&mut self, name: &str) {
        if let State::Option(_, option) = &mut self.state {
            option.set_name(name);
        }
    }

    fn end_option_value(&mut self, value: &str) {
        if let State::Option(_, option) = &mut self.state {
            option.set_value(value);
        }
    }

    fn end_option(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            State::Option(mut draft, option) => {
                if let Some(option) = option.finish(self.builder.registry()) {
                    draft.add_option(option);
                }
                State::Section(draft)
            }
            other => other,
        };
    }

    fn error(&mut self, error: ParseError) {
        tracing::debug!(
            "config in {}: {}: {}",
            self.builder.config_directory(),
            error.severity(),
            error
        );
        self.errors.push(error);
    }
}

/// A parsed file plus the problems skipped while reading it.
#[derive(Debug)]
pub struct ParseOutcome {
    pub config: EditorConfig,
    pub errors: Vec<ParseError>,
}

/// Parse configuration text that lives in `directory` (slash separated).
pub fn parse_editorconfig(
    source: &str,
    directory: &str,
    registry: &OptionTypeRegistry,
    version: &str,
) -> ParseOutcome {
    let builder = EditorConfig::builder(registry)
        .directory(directory)
        .version(version);
    let mut handler = ModelHandler::new(builder);
    parse_source(source, &mut handler);
    handler.finish()
}

/// Read and parse a configuration file from disk.
pub fn load_editorconfig(
    path: &Path,
    registry: &OptionTypeRegistry,
    version: &str,
) -> io::Result<ParseOutcome> {
    let source = fs::read_to_string(path)?;
    let directory = path.parent().map(slash_path).unwrap_or_default();
    Ok(parse_editorconfig(&source, &directory, registry, version))
}
