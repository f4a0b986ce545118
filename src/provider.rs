//! Access to files and directories for the cascade

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// What the resolver needs to know about files and directories.
pub trait ResourceProvider {
    type Resource: Clone + PartialEq + fmt::Debug;

    /// Containing directory, `None` at the top of the tree.
    fn parent(&self, resource: &Self::Resource) -> Option<Self::Resource>;

    fn child(&self, dir: &Self::Resource, name: &str) -> Self::Resource;

    /// Slash separated path used for glob matching.
    fn path(&self, resource: &Self::Resource) -> String;

    fn exists(&self, resource: &Self::Resource) -> io::Result<bool>;

    fn read_to_string(&self, resource: &Self::Resource) -> io::Result<String>;
}

/// Local file system provider; resources are plain paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsResourceProvider;

impl ResourceProvider for FsResourceProvider {
    type Resource = PathBuf;

    fn parent(&self, resource: &PathBuf) -> Option<PathBuf> {
        resource
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    fn child(&self, dir: &PathBuf, name: &str) -> PathBuf {
        dir.join(name)
    }

    fn path(&self, resource: &PathBuf) -> String {
        slash_path(resource)
    }

    fn exists(&self, resource: &PathBuf) -> io::Result<bool> {
        match fs::metadata(resource) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn read_to_string(&self, resource: &PathBuf) -> io::Result<String> {
        fs::read_to_string(resource)
    }
}

/// Path as a string with `/` separators.
pub fn slash_path(path: &Path) -> String {
    let path = path.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        path.into_owned()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}
