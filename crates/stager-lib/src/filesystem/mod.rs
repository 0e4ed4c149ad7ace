//! File system collaborators for target actions
//!
//! Glob enumeration (`*`, `?` within a path segment, `**` across segments),
//! directory cleanup and glob-driven copies. Everything returns
//! [`BuildError::Io`] with the offending path on failure.

pub mod archive;

use crate::primitives::{BuildError, BuildResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Which kind of entries a glob should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Files,
    Directories,
}

/// Entries under `base` whose relative path matches `pattern`, sorted by path
pub fn glob(base: &Path, pattern: &str, kind: EntryKind) -> BuildResult<Vec<PathBuf>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = pattern
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(base).min_depth(1).sort_by_file_name();
    if !segments.contains(&"**") {
        walker = walker.max_depth(segments.len());
    }

    let mut matches = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base).to_path_buf();
            BuildError::io(path, e.into())
        })?;

        let wanted = match kind {
            EntryKind::Files => entry.file_type().is_file(),
            EntryKind::Directories => entry.file_type().is_dir(),
        };
        if !wanted {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();

        if match_segments(&segments, &parts) {
            trace!(path = %entry.path().display(), pattern, "Glob match");
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

/// Whether an absolute (or cwd-relative) pattern matches at least one file
pub fn any_file_matches(pattern: &str) -> BuildResult<bool> {
    let (base, rest) = split_pattern(pattern);
    if rest.is_empty() {
        return Ok(base.is_file());
    }
    Ok(!glob(&base, &rest, EntryKind::Files)?.is_empty())
}

/// Split a pattern into its literal directory prefix and the wildcard remainder
pub fn split_pattern(pattern: &str) -> (PathBuf, String) {
    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();

    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        let literal = matches!(
            component,
            Component::Prefix(_) | Component::RootDir | Component::CurDir | Component::ParentDir
        ) || !has_wildcard(&text);

        if rest.is_empty() && literal {
            base.push(component.as_os_str());
        } else {
            rest.push(text.into_owned());
        }
    }

    if rest.is_empty() {
        return (base, String::new());
    }
    if base.as_os_str().is_empty() {
        base.push(".");
    }
    (base, rest.join("/"))
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?'])
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((part, remaining)) => {
                wildcard_match(segment, part) && match_segments(rest, remaining)
            }
            None => false,
        },
    }
}

/// Single-segment match supporting `*` (any run) and `?` (one character)
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p);
            resume = t;
            p += 1;
        } else if let Some(star_pos) = star {
            p = star_pos + 1;
            resume += 1;
            t = resume;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Recursively delete a directory; a missing directory is not an error
pub fn delete_directory(path: &Path) -> BuildResult<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Deleted directory");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::io(path, e)),
    }
}

/// Delete every directory under `base` matching any of `patterns`
///
/// Matches nested inside another match are dropped first, since deleting the
/// outer directory already removes them.
pub fn delete_matching_directories(base: &Path, patterns: &[&str]) -> BuildResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    for pattern in patterns {
        found.extend(glob(base, pattern, EntryKind::Directories)?);
    }
    found.sort();
    found.dedup();

    let mut outermost: Vec<PathBuf> = Vec::new();
    for path in found {
        if !outermost.iter().any(|kept| path.starts_with(kept)) {
            outermost.push(path);
        }
    }

    for path in &outermost {
        delete_directory(path)?;
    }
    Ok(outermost)
}

/// Leave `path` as an existing, empty directory
pub fn ensure_clean_directory(path: &Path) -> BuildResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| BuildError::io(path, e))?;
        return Ok(());
    }

    let entries = fs::read_dir(path).map_err(|e| BuildError::io(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(path, e))?;
        let entry_path = entry.path();
        let file_type = entry.file_type().map_err(|e| BuildError::io(&entry_path, e))?;
        let removed = if file_type.is_dir() {
            fs::remove_dir_all(&entry_path)
        } else {
            fs::remove_file(&entry_path)
        };
        removed.map_err(|e| BuildError::io(&entry_path, e))?;
    }
    Ok(())
}

/// True when `path` is a directory without any entries
pub fn is_empty_directory(path: &Path) -> BuildResult<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| BuildError::io(path, e))?;
    Ok(entries.next().is_none())
}

/// True when the directory at `path` holds at least one file at any depth
///
/// A missing directory is an error, not an empty one.
pub fn contains_files(path: &Path) -> BuildResult<bool> {
    fs::read_dir(path).map_err(|e| BuildError::io(path, e))?;

    for entry in WalkDir::new(path).min_depth(1) {
        let entry = entry.map_err(|e| {
            let entry_path = e.path().unwrap_or(path).to_path_buf();
            BuildError::io(entry_path, e.into())
        })?;
        if entry.file_type().is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Copy files in `source_dir` matching `pattern` into `dest_dir`, keeping file names
pub fn copy_matching(source_dir: &Path, pattern: &str, dest_dir: &Path) -> BuildResult<Vec<PathBuf>> {
    let files = glob(source_dir, pattern, EntryKind::Files)?;
    if files.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(dest_dir).map_err(|e| BuildError::io(dest_dir, e))?;

    let mut copied = Vec::with_capacity(files.len());
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let destination = dest_dir.join(name);
        fs::copy(&file, &destination).map_err(|e| BuildError::io(&file, e))?;
        debug!(from = %file.display(), to = %destination.display(), "Copied file");
        copied.push(destination);
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
