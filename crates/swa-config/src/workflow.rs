//! Workflow descriptor discovery.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Directory, relative to the working directory, holding workflow files.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

// azure-static-web-apps-<anything>.yml / .yaml
static DESCRIPTOR_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"azure-static-web-apps-.*\.ya?ml$").unwrap());

/// Outcome of looking for a workflow descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorLookup {
    /// A descriptor file was found.
    Found(PathBuf),
    /// The workflows directory does not exist (or cannot be listed).
    MissingDirectory(PathBuf),
    /// The workflows directory exists but holds no matching file.
    MissingFile(PathBuf),
}

impl DescriptorLookup {
    pub fn path(&self) -> Option<&Path> {
        match self {
            DescriptorLookup::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Whether a file name looks like a static web apps workflow descriptor.
pub fn is_descriptor_name(name: &str) -> bool {
    DESCRIPTOR_NAME.is_match(name)
}

/// Locate the workflow descriptor under `cwd`.
///
/// When several files match, names are sorted and the last one wins.
pub fn locate_descriptor(cwd: &Path) -> DescriptorLookup {
    let dir = cwd.join(WORKFLOWS_DIR);

    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Workflows directory not readable");
            return DescriptorLookup::MissingDirectory(dir);
        }
    };

    let mut candidates: Vec<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| is_descriptor_name(name))
        .collect();
    candidates.sort();

    let Some(chosen) = candidates.last() else {
        return DescriptorLookup::MissingFile(dir);
    };

    if candidates.len() > 1 {
        warn!(
            ?candidates,
            chosen = %chosen,
            "Multiple workflow descriptors found, using the last one"
        );
    }

    DescriptorLookup::Found(dir.join(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workflows_dir(temp: &TempDir) -> PathBuf {
        let dir = temp.path().join(WORKFLOWS_DIR);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_descriptor_name_pattern() {
        assert!(is_descriptor_name("azure-static-web-apps-purple-sea-0a1b2c.yml"));
        assert!(is_descriptor_name("azure-static-web-apps-site.yaml"));
        assert!(!is_descriptor_name("azure-static-web-apps.yml"));
        assert!(!is_descriptor_name("azure-static-web-apps-site.yml.bak"));
        assert!(!is_descriptor_name("ci.yml"));
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let lookup = locate_descriptor(temp.path());
        assert_eq!(
            lookup,
            DescriptorLookup::MissingDirectory(temp.path().join(WORKFLOWS_DIR))
        );
        assert!(lookup.path().is_none());
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let dir = workflows_dir(&temp);
        fs::write(dir.join("ci.yml"), "name: ci").unwrap();

        assert_eq!(
            locate_descriptor(temp.path()),
            DescriptorLookup::MissingFile(dir)
        );
    }

    #[test]
    fn test_found_single() {
        let temp = TempDir::new().unwrap();
        let dir = workflows_dir(&temp);
        fs::write(dir.join("azure-static-web-apps-site.yml"), "jobs: {}").unwrap();
        fs::write(dir.join("ci.yml"), "name: ci").unwrap();

        let lookup = locate_descriptor(temp.path());
        assert_eq!(
            lookup.path(),
            Some(dir.join("azure-static-web-apps-site.yml").as_path())
        );
    }

    #[test]
    fn test_multiple_matches_last_sorted_wins() {
        let temp = TempDir::new().unwrap();
        let dir = workflows_dir(&temp);
        fs::write(dir.join("azure-static-web-apps-b.yml"), "").unwrap();
        fs::write(dir.join("azure-static-web-apps-c.yaml"), "").unwrap();
        fs::write(dir.join("azure-static-web-apps-a.yml"), "").unwrap();

        assert_eq!(
            locate_descriptor(temp.path()),
            DescriptorLookup::Found(dir.join("azure-static-web-apps-c.yaml"))
        );
    }

    #[test]
    fn test_directories_are_ignored() {
        let temp = TempDir::new().unwrap();
        let dir = workflows_dir(&temp);
        fs::create_dir(dir.join("azure-static-web-apps-nested.yml")).unwrap();

        assert_eq!(
            locate_descriptor(temp.path()),
            DescriptorLookup::MissingFile(dir)
        );
    }
}
