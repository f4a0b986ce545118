use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};

/// Expand the command line targets into the files to resolve.
///
/// Directories are walked recursively, skipping hidden entries and anything
/// gitignored. Other paths are taken as-is, existing or not: settings can be
/// resolved for a file before it is created.
pub fn walk_targets(paths: &[String]) -> Vec<io::Result<PathBuf>> {
    let mut targets = vec![];

    for path in paths {
        if !Path::new(path).is_dir() {
            targets.push(Ok(PathBuf::from(path)));
            continue;
        }

        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        targets.push(Ok(entry.into_path()));
                    }
                }
                Err(e) => targets.push(Err(io::Error::other(e.to_string()))),
            }
        }
    }

    targets
}
