//! A glob and the options that apply to the paths it matches

use std::fmt;

use indexmap::IndexMap;

use crate::glob::GlobMatcher;
use crate::option_types::{OptionTypeRegistry, ROOT};

use super::derive::apply_derivation_rules;
use super::option::EditorOption;

/// A sealed section, built only through [`SectionDraft::build`] so its
/// option names are unique and derived options are present.
///
/// A section without a glob matches every path.
#[derive(Debug, Clone)]
pub struct Section {
    glob: Option<GlobMatcher>,
    options: Vec<EditorOption>,
}

impl Section {
    pub fn glob(&self) -> Option<&GlobMatcher> {
        self.glob.as_ref()
    }

    pub fn options(&self) -> &[EditorOption] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&EditorOption> {
        let name = name.to_ascii_lowercase();
        self.options.iter().find(|o| o.name() == name)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.glob.as_ref().map_or(true, |glob| glob.matches(path))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(glob) = &self.glob {
            writeln!(f, "[{glob}]")?;
        }
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

/// A section whose options are still being read.
///
/// A draft that never receives a glob is the preamble before the first
/// header; it only ever contributes the `root` flag.
#[derive(Debug, Default, Clone)]
pub struct SectionDraft {
    glob: Option<GlobMatcher>,
    options: IndexMap<String, EditorOption>,
}

impl SectionDraft {
    pub fn set_glob(&mut self, glob: GlobMatcher) {
        self.glob = Some(glob);
    }

    pub fn has_glob(&self) -> bool {
        self.glob.is_some()
    }

    /// Add an option; a later option with the same name replaces the earlier
    /// one but keeps its position.
    pub fn add_option(&mut self, option: EditorOption) {
        self.options.insert(option.name().to_string(), option);
    }

    /// Value of a `root` option: `true` (any case) or not.
    pub fn root_flag(&self) -> Option<bool> {
        self.options
            .get(ROOT)
            .map(|o| o.source_value().eq_ignore_ascii_case("true"))
    }

    /// Seal into a [`Section`], applying the derivation rules for `version`.
    pub fn build(mut self, version: &str, registry: &OptionTypeRegistry) -> Section {
        apply_derivation_rules(&mut self.options, version, registry);
        Section {
            glob: self.glob,
            options: self.options.into_values().collect(),
        }
    }
}
