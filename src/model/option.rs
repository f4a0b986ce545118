//! A single `name = value` declaration

use std::fmt;
use std::sync::Arc;

use crate::option_types::{has_case_insensitive_value, OptionType, OptionTypeRegistry, OptionValue};

/// Longest option name kept, in characters.
pub const MAX_NAME_LENGTH: usize = 50;
/// Longest option value kept, in characters.
pub const MAX_VALUE_LENGTH: usize = 255;

/// One option as declared (or derived) in a section.
///
/// Invalid values are kept with `valid == false` and no parsed value so that
/// tooling can still report them.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOption {
    name: String,
    source_value: String,
    parsed_value: Option<OptionValue>,
    valid: bool,
    option_type: Option<Arc<OptionType>>,
}

impl EditorOption {
    /// Build an option, looking its type up in `registry`.
    ///
    /// The name is lowercased. Values of the case-insensitive settings are
    /// lowercased before validation. Length limits are not checked here, see
    /// [`OptionDraft::finish`].
    pub fn new(registry: &OptionTypeRegistry, name: &str, value: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let source_value = if has_case_insensitive_value(&name) {
            value.to_lowercase()
        } else {
            value.to_string()
        };

        let option_type = registry.get(&name);
        let valid = option_type
            .as_ref()
            .is_some_and(|ty| ty.validate(&source_value).is_ok());
        let parsed_value = if valid {
            option_type.as_ref().and_then(|ty| ty.parse(&source_value))
        } else {
            None
        };

        Self {
            name,
            source_value,
            parsed_value,
            valid,
            option_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value as written (lowercased for case-insensitive settings).
    pub fn source_value(&self) -> &str {
        &self.source_value
    }

    pub fn parsed_value(&self) -> Option<&OptionValue> {
        self.parsed_value.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn option_type(&self) -> Option<&OptionType> {
        self.option_type.as_deref()
    }
}

impl fmt::Display for EditorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.source_value)
    }
}

/// An option whose name and value are still being read.
#[derive(Debug, Default, Clone)]
pub struct OptionDraft {
    name: Option<String>,
    value: Option<String>,
}

impl OptionDraft {
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = Some(value.to_string());
    }

    /// Seal the draft.
    ///
    /// Returns `None` when the draft has no name or when the name or value is
    /// longer than the allowed maximum; such options are dropped.
    pub fn finish(self, registry: &OptionTypeRegistry) -> Option<EditorOption> {
        let name = self.name?;
        let value = self.value.unwrap_or_default();

        if name.chars().count() > MAX_NAME_LENGTH || value.chars().count() > MAX_VALUE_LENGTH {
            tracing::debug!("dropping oversized option '{}'", truncate(&name, 20));
            return None;
        }

        Some(EditorOption::new(registry, &name, &value))
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
