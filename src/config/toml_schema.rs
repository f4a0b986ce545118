//! TOML schema definitions for ecascade.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root structure for ecascade.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EcascadeToml {
    /// Resolution settings
    #[serde(default)]
    pub resolve: ResolveSection,
}

/// `[resolve]` section in ecascade.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ResolveSection {
    /// Configuration file looked up in each directory (default: `.editorconfig`)
    pub config_filename: Option<String>,

    /// EditorConfig specification version the files follow
    pub version: Option<String>,

    /// Directories the upward search never leaves
    pub root_dirs: Option<Vec<PathBuf>>,
}

impl ResolveSection {
    /// `root_dirs` with relative entries taken relative to `base`, normally
    /// the directory holding ecascade.toml.
    pub fn root_dirs_relative_to(&self, base: &Path) -> Option<Vec<PathBuf>> {
        self.root_dirs.as_ref().map(|dirs| {
            dirs.iter()
                .map(|d| if d.is_absolute() { d.clone() } else { base.join(d) })
                .collect()
        })
    }
}
