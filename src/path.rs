//! Path manipulation utilities for docs-sync
//!
//! Configuration values end up as path segments (collection names, target
//! subdirectories, titles, docs paths). They are treated as opaque, but every
//! path built here stays inside the directory it is joined onto: root,
//! drive-prefix, `.` and `..` components are dropped.

use std::path::{Component, Path, PathBuf};

/// Append the normal components of `segment` to `base`.
///
/// `"team-x/sub"` appends two components, `"/etc"` appends `etc`, and
/// `"../x"` appends only `x`. An empty segment appends nothing.
pub fn push_segment(base: &mut PathBuf, segment: &str) {
    for component in Path::new(segment).components() {
        if let Component::Normal(part) = component {
            base.push(part);
        }
    }
}

/// True when `segment` contributes at least one component to a path.
///
/// `""`, `"."`, `".."` and `"/"` do not.
pub fn names_directory(segment: &str) -> bool {
    Path::new(segment)
        .components()
        .any(|component| matches!(component, Component::Normal(_)))
}

/// Compose the destination directory for one repository.
///
/// The layout is `{docs_root}/{collection}/{target_subdir?}/{title}`.
pub fn destination_dir(
    docs_root: &Path,
    collection: &str,
    target_subdir: Option<&str>,
    title: &str,
) -> PathBuf {
    let mut destination = docs_root.to_path_buf();
    push_segment(&mut destination, collection);
    if let Some(subdir) = target_subdir {
        push_segment(&mut destination, subdir);
    }
    push_segment(&mut destination, title);
    destination
}

/// Resolve a configured docs path against a fetched repository root.
///
/// Docs paths are written repository-relative, usually with a leading slash
/// (`"/docs"`). `"/"` and `""` resolve to the repository root itself.
pub fn resolve_docs_path(fetched_root: &Path, docs_path: &str) -> PathBuf {
    let mut source = fetched_root.to_path_buf();
    push_segment(&mut source, docs_path);
    source
}

/// Encode a collection name so it can prefix a temporary directory name.
///
/// Characters that are problematic for filesystems become `_` or `-`;
/// alphanumerics, dots, dashes and underscores are kept.
pub fn encode_workspace_prefix(name: &str) -> String {
    let encoded: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' => c,
            _ => '_',
        })
        .collect();

    if encoded.is_empty() {
        "docs".to_string()
    } else {
        encoded
    }
}
