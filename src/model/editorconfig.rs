//! Model of one physical `.editorconfig` file

use std::fmt;

use crate::glob::GlobMatcher;
use crate::option_types::OptionTypeRegistry;

use super::section::{Section, SectionDraft};

/// Version of the EditorConfig specification assumed when none is given.
pub const DEFAULT_VERSION: &str = "0.12.0";

/// The parsed content of one configuration file.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    directory: String,
    version: String,
    /// `None` when the file does not declare `root` at all
    root: Option<bool>,
    sections: Vec<Section>,
}

impl EditorConfig {
    pub fn builder(registry: &OptionTypeRegistry) -> EditorConfigBuilder<'_> {
        EditorConfigBuilder::new(registry)
    }

    /// Slash separated directory the file lives in.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> Option<bool> {
        self.root
    }

    pub fn has_root_property(&self) -> bool {
        self.root.is_some()
    }

    /// Whether the upward search stops at this file.
    pub fn is_root(&self) -> bool {
        self.root == Some(true)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

/// Renders back to the file format: `root` first, then the sections
/// separated by blank lines.
impl fmt::Display for EditorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(root) = self.root {
            writeln!(f, "root = {root}")?;
            if !self.sections.is_empty() {
                writeln!(f)?;
            }
        }
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{section}")?;
        }
        Ok(())
    }
}

/// Collects sections for an [`EditorConfig`].
#[derive(Debug)]
pub struct EditorConfigBuilder<'r> {
    registry: &'r OptionTypeRegistry,
    directory: String,
    version: String,
    root: Option<bool>,
    sections: Vec<Section>,
}

impl<'r> EditorConfigBuilder<'r> {
    pub fn new(registry: &'r OptionTypeRegistry) -> Self {
        Self {
            registry,
            directory: String::new(),
            version: DEFAULT_VERSION.to_string(),
            root: None,
            sections: Vec::new(),
        }
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn root(mut self, root: Option<bool>) -> Self {
        self.root = root;
        self
    }

    pub fn registry(&self) -> &'r OptionTypeRegistry {
        self.registry
    }

    pub fn config_directory(&self) -> &str {
        &self.directory
    }

    /// Compile a section pattern relative to this file's directory.
    pub fn compile_glob(&self, pattern: &str) -> GlobMatcher {
        GlobMatcher::compile(&self.directory, pattern)
    }

    /// Seal a draft. The glob-less preamble only sets the root flag.
    pub fn close_section(&mut self, draft: SectionDraft) {
        if draft.has_glob() {
            self.sections.push(draft.build(&self.version, self.registry));
        } else if let Some(root) = draft.root_flag() {
            self.root = Some(root);
        }
    }

    pub fn build(self) -> EditorConfig {
        EditorConfig {
            directory: self.directory,
            version: self.version,
            root: self.root,
            sections: self.sections,
        }
    }
}
