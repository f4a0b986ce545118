//! Cascading resolution of the options that apply to one file
//!
//! Configuration files are read from the file's directory upward. A file
//! closer to the target overrides farther ones; the walk stops after a file
//! declaring `root = true` or after an explicit root directory.

use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::model::{EditorConfig, EditorOption, DEFAULT_VERSION};
use crate::option_types::OptionTypeRegistry;
use crate::parser::parse_editorconfig;
use crate::provider::ResourceProvider;

/// Name of the configuration file searched in each directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".editorconfig";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub config_filename: String,
    /// Specification version the files are read against
    pub version: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            config_filename: DEFAULT_CONFIG_FILENAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// Resolves options for files reachable through a [`ResourceProvider`].
///
/// The resolver holds no mutable state, so one instance can serve
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct Resolver<'r, P> {
    provider: P,
    registry: &'r OptionTypeRegistry,
    settings: ResolverSettings,
}

impl<'r, P: ResourceProvider> Resolver<'r, P> {
    pub fn new(provider: P, registry: &'r OptionTypeRegistry) -> Self {
        Self {
            provider,
            registry,
            settings: ResolverSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ResolverSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Read and parse the configuration file `config_file` found in `dir`.
    pub fn load(
        &self,
        config_file: &P::Resource,
        dir: &P::Resource,
    ) -> Result<EditorConfig, ResolveError> {
        let source = self
            .provider
            .read_to_string(config_file)
            .map_err(|e| ResolveError::io(self.provider.path(config_file), e))?;

        let outcome = parse_editorconfig(
            &source,
            &self.provider.path(dir),
            self.registry,
            &self.settings.version,
        );
        if !outcome.errors.is_empty() {
            tracing::warn!(
                "{}: skipped {} malformed line(s)",
                self.provider.path(config_file),
                outcome.errors.len()
            );
        }
        Ok(outcome.config)
    }

    /// Effective options for `file`, keyed by option name.
    ///
    /// `explicit_roots` are directories above which the search never goes,
    /// whatever their configuration files say.
    pub fn resolve_map(
        &self,
        file: &P::Resource,
        explicit_roots: &[P::Resource],
    ) -> Result<IndexMap<String, EditorOption>, ResolveError> {
        let target = self.provider.path(file);
        let mut resolved: IndexMap<String, EditorOption> = IndexMap::new();
        let mut current = self.provider.parent(file);
        let mut stop = false;

        while !stop {
            let Some(dir) = current else {
                break;
            };

            let config_file = self.provider.child(&dir, &self.settings.config_filename);
            let exists = self
                .provider
                .exists(&config_file)
                .map_err(|e| ResolveError::io(self.provider.path(&config_file), e))?;

            if exists {
                let config = self.load(&config_file, &dir)?;
                tracing::debug!(
                    "{} applies to {} (root: {:?})",
                    self.provider.path(&config_file),
                    target,
                    config.root()
                );
                stop |= config.is_root();

                // Within a file the last matching declaration wins
                let mut local: IndexMap<String, EditorOption> = IndexMap::new();
                for section in config.sections().iter().filter(|s| s.matches(&target)) {
                    for option in section.options() {
                        local.insert(option.name().to_string(), option.clone());
                    }
                }

                // Across files the closest one wins
                for (name, option) in local {
                    resolved.entry(name).or_insert(option);
                }
            }

            stop |= explicit_roots.contains(&dir);
            current = self.provider.parent(&dir);
        }

        Ok(resolved)
    }

    /// Effective options for `file`, in resolution order.
    pub fn resolve(
        &self,
        file: &P::Resource,
        explicit_roots: &[P::Resource],
    ) -> Result<Vec<EditorOption>, ResolveError> {
        Ok(self
            .resolve_map(file, explicit_roots)?
            .into_values()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FsResourceProvider;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn resolve(file: &Path, roots: &[PathBuf]) -> IndexMap<String, String> {
        let registry = OptionTypeRegistry::builtin();
        Resolver::new(FsResourceProvider, &registry)
            .resolve_map(&file.to_path_buf(), roots)
            .unwrap()
            .into_iter()
            .map(|(name, option)| (name, option.source_value().to_string()))
            .collect()
    }

    #[test]
    fn test_closer_file_wins() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        write(&a.join(".editorconfig"), "[*]\nindent_size = 2\n");
        write(&a.join("b/.editorconfig"), "[*]\nindent_size = 4\n");

        let options = resolve(&a.join("b/c.txt"), &[dir.path().to_path_buf()]);
        assert_eq!(options.get("indent_size").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_farther_file_fills_missing_names() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        write(&a.join(".editorconfig"), "[*]\ncharset = utf-8\nindent_size = 2\n");
        write(&a.join("b/.editorconfig"), "[*]\nindent_size = 4\n");

        let options = resolve(&a.join("b/c.txt"), &[dir.path().to_path_buf()]);
        assert_eq!(options.get("charset").map(String::as_str), Some("utf-8"));
        assert_eq!(options.get("indent_size").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_root_true_stops_cascade() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "[*]\nfoo = 2\nbar = 3\n");
        write(&dir.path().join("a/.editorconfig"), "root = true\n[*]\nfoo = 1\n");

        let options = resolve(&dir.path().join("a/file.txt"), &[dir.path().to_path_buf()]);
        assert_eq!(options.get("foo").map(String::as_str), Some("1"));
        assert!(!options.contains_key("bar"));
    }

    #[test]
    fn test_root_false_does_not_stop_cascade() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "[*]\nbar = 3\n");
        write(&dir.path().join("a/.editorconfig"), "root = false\n[*]\nfoo = 1\n");

        let options = resolve(&dir.path().join("a/file.txt"), &[dir.path().to_path_buf()]);
        assert_eq!(options.get("bar").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_explicit_root_directory_stops_cascade() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "[*]\nbar = 3\n");
        write(&dir.path().join("a/.editorconfig"), "[*]\nfoo = 1\n");

        let options = resolve(&dir.path().join("a/file.txt"), &[dir.path().join("a")]);
        assert_eq!(options.get("foo").map(String::as_str), Some("1"));
        assert!(!options.contains_key("bar"));
    }

    #[test]
    fn test_later_section_wins_within_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join(".editorconfig"),
            "root = true\n[*]\nindent_style = space\n[*.go]\nindent_style = tab\n",
        );

        let options = resolve(&dir.path().join("main.go"), &[]);
        assert_eq!(options.get("indent_style").map(String::as_str), Some("tab"));
        // derived from indent_style = tab in the [*.go] section
        assert_eq!(options.get("indent_size").map(String::as_str), Some("tab"));

        let options = resolve(&dir.path().join("main.rs"), &[]);
        assert_eq!(options.get("indent_style").map(String::as_str), Some("space"));
    }

    #[test]
    fn test_non_matching_sections_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(
            &dir.path().join(".editorconfig"),
            "root = true\n[*.md]\ntrim_trailing_whitespace = false\n[src/*.rs]\nindent_size = 4\n",
        );

        let options = resolve(&dir.path().join("lib/x.rs"), &[]);
        assert!(options.is_empty());

        let options = resolve(&dir.path().join("src/x.rs"), &[]);
        assert_eq!(options.get("indent_size").map(String::as_str), Some("4"));
        assert_eq!(options.get("tab_width").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_nested_pattern_is_relative_to_its_file() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "root = true\n");
        write(&dir.path().join("sub/.editorconfig"), "[src/*.c]\nindent_size = 8\n");

        let options = resolve(&dir.path().join("sub/src/a.c"), &[]);
        assert_eq!(options.get("indent_size").map(String::as_str), Some("8"));

        let options = resolve(&dir.path().join("src/a.c"), &[]);
        assert!(options.is_empty());
    }

    #[test]
    fn test_invalid_options_are_returned_marked_invalid() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "root = true\n[*]\nindent_style = sideways\n");

        let registry = OptionTypeRegistry::builtin();
        let options = Resolver::new(FsResourceProvider, &registry)
            .resolve(&dir.path().join("x.txt"), &[])
            .unwrap();
        assert_eq!(options.len(), 1);
        assert!(!options[0].is_valid());
        assert!(options[0].parsed_value().is_none());
    }

    #[test]
    fn test_custom_config_filename() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "root = true\n[*]\nfoo = 1\n");
        write(&dir.path().join(".myconfig"), "root = true\n[*]\nfoo = 2\n");

        let registry = OptionTypeRegistry::builtin();
        let resolver = Resolver::new(FsResourceProvider, &registry).with_settings(ResolverSettings {
            config_filename: ".myconfig".to_string(),
            ..Default::default()
        });
        let options = resolver.resolve_map(&dir.path().join("x"), &[]).unwrap();
        assert_eq!(options["foo"].source_value(), "2");
    }

    #[test]
    fn test_unreadable_config_aborts_resolution() {
        let dir = TempDir::new().unwrap();
        // A config file that is not valid UTF-8 cannot be read as text
        fs::write(dir.path().join(".editorconfig"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let registry = OptionTypeRegistry::builtin();
        let result = Resolver::new(FsResourceProvider, &registry)
            .resolve(&dir.path().join("x.txt"), &[dir.path().to_path_buf()]);
        assert!(matches!(result, Err(ResolveError::Io { .. })));
    }

    #[test]
    fn test_concurrent_resolution_shares_registry() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join(".editorconfig"), "root = true\n[*.{1..4}]\nindent_size = 3\n");

        let registry = OptionTypeRegistry::builtin();
        let resolver = Resolver::new(FsResourceProvider, &registry);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4)
                .map(|n| {
                    let resolver = &resolver;
                    let file = dir.path().join(format!("f.{n}"));
                    scope.spawn(move || resolver.resolve(&file, &[]).unwrap().len())
                })
                .collect();
            for handle in handles {
                // indent_size plus derived tab_width
                assert_eq!(handle.join().unwrap(), 2);
            }
        });
    }
}
