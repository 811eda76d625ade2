//! Lexical path helpers
//!
//! tsconfig references are joined the way Node's `path` module joins them:
//! segments are concatenated and `.`/`..` are folded without touching the
//! disk, and a leading `/` in a later segment does not reset the path.
//! `PathBuf::join` replaces the path on an absolute segment and keeps `..`
//! around, so it is not used for config references.

use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf, is_separator};

/// Join `segment` onto `base` and normalize the result
///
/// A trailing separator on `segment` is kept.
pub fn join(base: &Path, segment: impl AsRef<Path>) -> PathBuf {
    let segment = segment.as_ref();
    let joined = join_components(base, segment);
    if ends_with_separator(segment) && !ends_with_separator(&joined) {
        let mut joined = joined.into_os_string();
        joined.push(MAIN_SEPARATOR_STR);
        return PathBuf::from(joined);
    }
    joined
}

/// Fold `.` and `..` segments out of `path`
pub fn normalize(path: &Path) -> PathBuf {
    fold(path.components())
}

/// Directory part of `path`, `.` for a bare file name
pub fn dirname(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => path.to_path_buf(),
    }
}

/// `segment` itself when absolute, otherwise `segment` joined onto `base`
///
/// Unlike [`join`], the result never has a trailing separator.
pub fn resolve(base: &Path, segment: impl AsRef<Path>) -> PathBuf {
    let segment = segment.as_ref();
    if segment.is_absolute() {
        normalize(segment)
    } else {
        join_components(base, segment)
    }
}

fn join_components(base: &Path, segment: &Path) -> PathBuf {
    let tail = segment
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect::<Vec<_>>();
    fold(base.components().chain(tail))
}

fn ends_with_separator(path: &Path) -> bool {
    path.to_string_lossy().ends_with(is_separator)
}

fn fold<'a>(components: impl Iterator<Item = Component<'a>>) -> PathBuf {
    let mut out: Vec<Component<'a>> = Vec::new();
    for component in components {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.into_iter().collect()
    }
}
