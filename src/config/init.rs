//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILENAME;

/// Template ecascade.toml with documentation
pub const ECASCADE_TOML_TEMPLATE: &str = r#"# ecascade.toml - Configuration for the ecascade settings resolver
#
# ecascade reads .editorconfig files from a file's directory upward and
# prints the settings that apply to it. Files closer to the target win.
# The search stops at a file declaring `root = true`, or at one of the
# root directories below.
#
# Command line flags override everything here.

[resolve]
# Name of the configuration file looked up in each directory.
# Default: ".editorconfig"
# config_filename = ".editorconfig"

# EditorConfig specification version the files follow. Versions before
# 0.10.0 do not derive `indent_size = tab` from `indent_style = tab`.
# Default: "0.12.0"
# version = "0.12.0"

# Directories the upward search never leaves. Relative paths are relative
# to this file.
# root_dirs = ["."]
"#;

/// Generate ecascade.toml in the specified directory (or current directory if None).
///
/// Returns an error if ecascade.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from(CONFIG_FILENAME), |d| d.join(CONFIG_FILENAME));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILENAME} already exists"),
        ));
    }

    fs::write(&path, ECASCADE_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate ecascade.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
