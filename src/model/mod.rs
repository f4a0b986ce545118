//! Immutable model of `.editorconfig` files.
//!
//! Values are assembled bottom-up from drafts: an [`OptionDraft`] is sealed
//! into an [`EditorOption`], a [`SectionDraft`] collects options and is sealed
//! into a [`Section`] (running the derivation rules on the way), and an
//! [`EditorConfigBuilder`] collects sections into an [`EditorConfig`].

mod derive;
mod editorconfig;
mod option;
mod section;

pub use derive::{apply_derivation_rules, compare_versions};
pub use editorconfig::{EditorConfig, EditorConfigBuilder, DEFAULT_VERSION};
pub use option::{EditorOption, OptionDraft, MAX_NAME_LENGTH, MAX_VALUE_LENGTH};
pub use section::{Section, SectionDraft};
