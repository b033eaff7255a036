//! Lexical path joining and normalisation.
//!
//! Nothing here touches the filesystem. Workflow descriptors describe
//! locations relative to the project root and commonly spell that root as
//! `/`, so [`join_normalized`] always appends the segment to the base
//! instead of letting a leading separator replace it.

use std::path::{Component, Path, PathBuf};

/// Join `segment` onto `base` and normalise the result.
///
/// Leading separators in `segment` are ignored and backslashes are treated
/// as separators.
pub fn join_normalized(base: impl AsRef<Path>, segment: &str) -> PathBuf {
    let segment = segment.replace('\\', "/");
    let mut parts = Vec::new();

    for component in base.as_ref().components() {
        push_component(&mut parts, component);
    }
    for component in Path::new(&segment).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => continue,
            other => push_component(&mut parts, other),
        }
    }

    collect(parts)
}

/// Normalise a path lexically.
///
/// Drops `.` components, resolves `..` against the preceding component
/// (never above the root), collapses repeated separators and drops any
/// trailing separator.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut parts = Vec::new();
    for component in path.as_ref().components() {
        push_component(&mut parts, component);
    }
    collect(parts)
}

fn push_component<'a>(parts: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {}
        Component::ParentDir => match parts.last() {
            Some(Component::Normal(_)) => {
                parts.pop();
            }
            // `..` at the root stays at the root
            Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
            _ => parts.push(component),
        },
        other => parts.push(other),
    }
}

fn collect(parts: Vec<Component<'_>>) -> PathBuf {
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
