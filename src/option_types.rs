//! Option type registry: how each known setting validates and parses its value

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::OptionError;

pub const INDENT_STYLE: &str = "indent_style";
pub const INDENT_SIZE: &str = "indent_size";
pub const TAB_WIDTH: &str = "tab_width";
pub const END_OF_LINE: &str = "end_of_line";
pub const CHARSET: &str = "charset";
pub const TRIM_TRAILING_WHITESPACE: &str = "trim_trailing_whitespace";
pub const INSERT_FINAL_NEWLINE: &str = "insert_final_newline";
pub const MAX_LINE_LENGTH: &str = "max_line_length";
pub const ROOT: &str = "root";

/// Any option may be explicitly reset with this value.
pub const UNSET: &str = "unset";

/// Settings whose values are compared without regard to case
const CASE_INSENSITIVE_VALUES: &[&str] = &[
    END_OF_LINE,
    INDENT_STYLE,
    INDENT_SIZE,
    INSERT_FINAL_NEWLINE,
    TRIM_TRAILING_WHITESPACE,
    CHARSET,
];

/// Whether the value of `name` is lowercased before validation.
pub fn has_case_insensitive_value(name: &str) -> bool {
    CASE_INSENSITIVE_VALUES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(name))
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Unset,
    Bool(bool),
    Int(u32),
    /// `tab`, as accepted by `indent_size`
    Tab,
    /// `off`, as accepted by `max_line_length`
    Off,
    /// One of an enumeration's words, lowercased
    Word(String),
    Text(String),
}

/// Shape of the values a setting accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    PositiveInt,
    PositiveIntOrTab,
    PositiveIntOrOff,
    OneOf(&'static [&'static str]),
    /// Any non-empty string
    Text,
}

impl ValueKind {
    fn expected(&self) -> String {
        match self {
            ValueKind::Boolean => "true or false".to_string(),
            ValueKind::PositiveInt => "a positive integer".to_string(),
            ValueKind::PositiveIntOrTab => "a positive integer or tab".to_string(),
            ValueKind::PositiveIntOrOff => "a positive integer or off".to_string(),
            ValueKind::OneOf(words) => format!("one of {}", words.join(", ")),
            ValueKind::Text => "a non-empty value".to_string(),
        }
    }

    fn parse(&self, raw: &str) -> Option<OptionValue> {
        if raw.eq_ignore_ascii_case(UNSET) {
            return Some(OptionValue::Unset);
        }
        match self {
            ValueKind::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Some(OptionValue::Bool(true)),
                "false" => Some(OptionValue::Bool(false)),
                _ => None,
            },
            ValueKind::PositiveInt => parse_positive(raw),
            ValueKind::PositiveIntOrTab => {
                if raw.eq_ignore_ascii_case("tab") {
                    Some(OptionValue::Tab)
                } else {
                    parse_positive(raw)
                }
            }
            ValueKind::PositiveIntOrOff => {
                if raw.eq_ignore_ascii_case("off") {
                    Some(OptionValue::Off)
                } else {
                    parse_positive(raw)
                }
            }
            ValueKind::OneOf(words) => words
                .iter()
                .find(|w| w.eq_ignore_ascii_case(raw))
                .map(|w| OptionValue::Word(w.to_string())),
            ValueKind::Text => (!raw.is_empty()).then(|| OptionValue::Text(raw.to_string())),
        }
    }
}

fn parse_positive(raw: &str) -> Option<OptionValue> {
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Some(OptionValue::Int(n)),
        _ => None,
    }
}

/// Validation and parsing for one setting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionType {
    name: String,
    kind: ValueKind,
}

impl OptionType {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn validate(&self, raw: &str) -> Result<(), OptionError> {
        match self.kind.parse(raw) {
            Some(_) => Ok(()),
            None => Err(OptionError {
                name: self.name.clone(),
                value: raw.to_string(),
                expected: self.kind.expected(),
            }),
        }
    }

    /// Typed value of `raw`, or `None` when it does not validate.
    pub fn parse(&self, raw: &str) -> Option<OptionValue> {
        self.kind.parse(raw)
    }
}

/// Read-only table of option types keyed by lowercase setting name.
///
/// Build it once and share it by reference (or behind an `Arc`) between
/// every parse and resolution.
#[derive(Debug, Clone, Default)]
pub struct OptionTypeRegistry {
    types: HashMap<String, Arc<OptionType>>,
}

impl OptionTypeRegistry {
    /// Registry without any type; every option parsed against it is invalid.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The settings defined by the EditorConfig specification.
    pub fn builtin() -> Self {
        Self::empty()
            .with_type(OptionType::new(
                INDENT_STYLE,
                ValueKind::OneOf(&["tab", "space"]),
            ))
            .with_type(OptionType::new(INDENT_SIZE, ValueKind::PositiveIntOrTab))
            .with_type(OptionType::new(TAB_WIDTH, ValueKind::PositiveInt))
            .with_type(OptionType::new(
                END_OF_LINE,
                ValueKind::OneOf(&["lf", "cr", "crlf"]),
            ))
            .with_type(OptionType::new(
                CHARSET,
                ValueKind::OneOf(&["latin1", "utf-8", "utf-8-bom", "utf-16be", "utf-16le"]),
            ))
            .with_type(OptionType::new(TRIM_TRAILING_WHITESPACE, ValueKind::Boolean))
            .with_type(OptionType::new(INSERT_FINAL_NEWLINE, ValueKind::Boolean))
            .with_type(OptionType::new(MAX_LINE_LENGTH, ValueKind::PositiveIntOrOff))
            .with_type(OptionType::new(ROOT, ValueKind::Boolean))
    }

    /// Add or replace a type.
    pub fn with_type(mut self, option_type: OptionType) -> Self {
        self.types
            .insert(option_type.name.clone(), Arc::new(option_type));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<OptionType>> {
        self.types.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
