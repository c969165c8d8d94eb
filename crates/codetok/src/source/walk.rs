//! # Source File Discovery

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories whose name contains this marker are skipped (`__pycache__` and friends).
pub const SKIP_DIR_MARKER: &str = "__";

/// Does `file_name` match any of the `*<suffix>` patterns?
pub fn has_matching_suffix<S: AsRef<str>>(
    file_name: &str,
    suffixes: &[S],
) -> bool {
    suffixes.iter().any(|s| file_name.ends_with(s.as_ref()))
}

/// Recursively list the files under `roots` whose name ends with one of `suffixes`.
///
/// Directory entries are visited in name order; a root which is itself a file
/// is a candidate. Symlinked directories are not followed.
pub fn matching_files<P, S>(
    roots: &[P],
    suffixes: &[S],
) -> anyhow::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mut matches = Vec::new();
    for root in roots {
        let root = root.as_ref();
        let meta = fs::metadata(root)
            .with_context(|| format!("cannot read source root {}", root.display()))?;
        if meta.is_dir() {
            walk_dir(root, suffixes, &mut matches)?;
        } else if file_name_matches(root, suffixes) {
            matches.push(root.to_path_buf());
        }
    }
    Ok(matches)
}

fn file_name_matches<S: AsRef<str>>(
    path: &Path,
    suffixes: &[S],
) -> bool {
    path.file_name()
        .map(|n| has_matching_suffix(&n.to_string_lossy(), suffixes))
        .unwrap_or(false)
}

fn walk_dir<S: AsRef<str>>(
    dir: &Path,
    suffixes: &[S],
    matches: &mut Vec<PathBuf>,
) -> anyhow::Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("cannot list directory {}", dir.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("cannot list directory {}", dir.display()))?;
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("cannot stat {}", path.display()))?;

        if file_type.is_dir() {
            if !entry.file_name().to_string_lossy().contains(SKIP_DIR_MARKER) {
                subdirs.push(path);
            }
        } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
            if file_name_matches(&path, suffixes) {
                matches.push(path);
            }
        }
    }

    for subdir in subdirs {
        walk_dir(&subdir, suffixes, matches)?;
    }
    Ok(())
}
