//! File discovery via glob patterns
//!
//! Snapshots the filesystem at call time. A pattern is split at its first
//! wildcard component: the literal prefix is the directory walked, the rest
//! is compiled with `globset` (so `{a,b}` alternatives work) and matched
//! against paths relative to it. The walk is depth-first with entries sorted
//! by file name within each directory, so `docs/a.md` comes before
//! `docs/b/c.md` and `docs/b.md`. Dotfiles and dot-directories below the
//! walked directory are skipped unless the pattern spells a leading `.`.

use crate::config::source_pattern;
use crate::error::{CheckError, Result};
use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Documentation files matching `pattern`
pub fn discover_docs(pattern: &str) -> Result<Vec<PathBuf>> {
    expand(pattern)
}

/// Source files under `code_path` with an allow-listed extension.
///
/// `code_path` is a pattern prefix, so `packages/*/src` covers every package.
pub fn discover_sources(code_path: &str) -> Result<Vec<PathBuf>> {
    expand(&source_pattern(code_path))
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let (base, rest) = split_glob_prefix(pattern);
    let root = if base.is_empty() { Path::new(".") } else { Path::new(base) };

    // No wildcard at all: the pattern names one file
    if rest.is_empty() {
        let files = if root.is_file() { vec![root.to_path_buf()] } else { Vec::new() };
        return Ok(files);
    }

    let matcher = compile(pattern, rest)?;
    if !root.is_dir() {
        tracing::debug!(pattern, root = %root.display(), "glob root does not exist");
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(!names_hidden(rest))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| CheckError::Walk {
            pattern: pattern.to_string(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(relative) {
            let path = if base.is_empty() { relative } else { path };
            files.push(path.to_path_buf());
        }
    }

    tracing::debug!(pattern, matched = files.len(), "expanded glob");
    Ok(files)
}

fn compile(pattern: &str, rest: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(rest)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| CheckError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Split at the start of the first component holding a glob metacharacter
fn split_glob_prefix(pattern: &str) -> (&str, &str) {
    let Some(meta) = pattern.find(['*', '?', '[', '{']) else {
        return (pattern, "");
    };
    match pattern[..meta].rfind('/') {
        Some(0) => ("/", &pattern[1..]),
        Some(slash) => (&pattern[..slash], &pattern[slash + 1..]),
        None => ("", pattern),
    }
}

fn names_hidden(rest: &str) -> bool {
    rest.split('/').any(|component| component.starts_with('.'))
}
