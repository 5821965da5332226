//! Project discovery and filesystem helpers.
//!
//! Repositories arrive as an arbitrary, possibly multi-level folder
//! hierarchy: a flat dump of checkouts, or grouped by team / business unit.
//! The walker finds every Mule project root inside that hierarchy with a
//! depth-first search that stops descending the moment a directory is
//! classified as a project, so a project's internal folders are never
//! double-counted as further projects.

use crate::errors::MulemapError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_MAX_DEPTH: usize = 4;

/// One project root located by discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredProject {
    /// Directory name of the project root.
    pub name: String,
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the repository folder.
    pub relative_path: PathBuf,
    /// Number of path components between the repository folder and the
    /// project root.
    pub depth: usize,
    /// Bare name for top-level projects, full relative path for nested ones.
    pub display_name: String,
    /// Joined parent components, or `"local"` for top-level projects.
    pub source: String,
}

pub struct ProjectWalker {
    root: PathBuf,
    max_depth: usize,
    targets: Option<HashSet<String>>,
    ignore_patterns: Vec<String>,
}

impl ProjectWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            max_depth: DEFAULT_MAX_DEPTH,
            targets: None,
            ignore_patterns: vec![],
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Restrict discovery to the given project names. Matching is against
    /// the directory's own name, never its path.
    pub fn with_targets(mut self, targets: Option<Vec<String>>) -> Self {
        self.targets = targets.map(|names| names.into_iter().collect());
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Walk the repository folder and return every project root, ordered by
    /// relative path. A missing root is the one fatal error of a run.
    pub fn walk(&self) -> Result<Vec<DiscoveredProject>, MulemapError> {
        if !self.root.is_dir() {
            return Err(MulemapError::RootNotFound(self.root.clone()));
        }

        let mut found = Vec::new();
        self.walk_dir(&self.root, 0, &mut found);
        found.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(found)
    }

    fn walk_dir(&self, dir: &Path, depth: usize, found: &mut Vec<DiscoveredProject>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Could not list {}: {}", dir.display(), e);
                return;
            }
        };

        let mut children: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && !is_hidden(path))
            .collect();
        children.sort();

        for child in children {
            let child_depth = depth + 1;
            if child_depth > self.max_depth {
                continue;
            }
            if self.is_ignored(&child) {
                continue;
            }

            if is_project_root(&child) {
                // A project root is a leaf: record it (subject to the name
                // filter) and never look inside it for further projects.
                if self.matches_target(&child) {
                    found.push(self.describe(&child, child_depth));
                }
                continue;
            }

            self.walk_dir(&child, child_depth, found);
        }
    }

    fn matches_target(&self, dir: &Path) -> bool {
        match &self.targets {
            Some(targets) => dir_name(dir).map_or(false, |name| targets.contains(name)),
            None => true,
        }
    }

    fn is_ignored(&self, dir: &Path) -> bool {
        let path_str = dir.to_string_lossy();
        self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }

    fn describe(&self, dir: &Path, depth: usize) -> DiscoveredProject {
        let name = dir_name(dir).unwrap_or_default().to_string();
        let relative_path = dir
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| dir.to_path_buf());

        let (display_name, source) = if depth > 1 {
            let parents: Vec<String> = relative_path
                .iter()
                .take(depth - 1)
                .map(|part| part.to_string_lossy().into_owned())
                .collect();
            (relative_path.display().to_string(), parents.join("/"))
        } else {
            (name.clone(), "local".to_string())
        };

        DiscoveredProject {
            name,
            path: dir.to_path_buf(),
            relative_path,
            depth,
            display_name,
            source,
        }
    }
}

/// A directory is a Mule project root when it carries a Maven build
/// descriptor, a Mule packaging manifest, or the conventional configuration
/// source directory.
pub fn is_project_root(dir: &Path) -> bool {
    dir.join("pom.xml").is_file()
        || dir.join("mule-artifact.json").is_file()
        || dir.join("src").join("main").join("mule").is_dir()
}

fn is_hidden(path: &Path) -> bool {
    dir_name(path).map_or(false, |name| name.starts_with('.'))
}

fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// All files under `root` with one of the given extensions, ordered by path.
pub fn find_files_by_extension(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| extensions.contains(&ext))
        })
        .collect();
    files.sort();
    files
}

pub fn count_lines(content: &str) -> usize {
    content.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn mule_project(root: &Path, rel: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(dir.join("src/main/mule")).unwrap();
    }

    #[test]
    fn detects_roots_by_any_indicator() {
        let temp = TempDir::new().unwrap();
        let by_pom = temp.path().join("by-pom");
        fs::create_dir_all(&by_pom).unwrap();
        fs::write(by_pom.join("pom.xml"), "<project/>").unwrap();

        let by_manifest = temp.path().join("by-manifest");
        fs::create_dir_all(&by_manifest).unwrap();
        fs::write(by_manifest.join("mule-artifact.json"), "{}").unwrap();

        let by_layout = temp.path().join("by-layout");
        fs::create_dir_all(by_layout.join("src/main/mule")).unwrap();

        let plain = temp.path().join("plain");
        fs::create_dir_all(&plain).unwrap();

        assert!(is_project_root(&by_pom));
        assert!(is_project_root(&by_manifest));
        assert!(is_project_root(&by_layout));
        assert!(!is_project_root(&plain));
    }

    #[test]
    fn walk_finds_nested_projects_and_keeps_display_identity() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), "orders-api");
        mule_project(temp.path(), "finance/billing/invoice-sync");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .walk()
            .unwrap();

        assert_eq!(projects.len(), 2);
        let top = projects.iter().find(|p| p.name == "orders-api").unwrap();
        assert_eq!(top.depth, 1);
        assert_eq!(top.display_name, "orders-api");
        assert_eq!(top.source, "local");

        let nested = projects.iter().find(|p| p.name == "invoice-sync").unwrap();
        assert_eq!(nested.depth, 3);
        assert_eq!(
            nested.relative_path,
            PathBuf::from("finance/billing/invoice-sync")
        );
        assert_eq!(nested.display_name, "finance/billing/invoice-sync");
        assert_eq!(nested.source, "finance/billing");
    }

    #[test]
    fn walk_never_descends_into_a_project() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), "outer");
        // A project-like directory vendored inside another project is hidden.
        mule_project(temp.path(), "outer/vendored/inner");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .walk()
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "outer");
    }

    #[test]
    fn walk_skips_hidden_directories_and_respects_depth() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), ".git/fake-project");
        mule_project(temp.path(), "a/b/c/d/too-deep");
        mule_project(temp.path(), "a/b/c/at-bound");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .walk()
            .unwrap();

        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["at-bound"]);
        assert!(projects.iter().all(|p| p.depth <= DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn target_filter_matches_directory_name_not_path() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), "team-a/orders-api");
        mule_project(temp.path(), "team-a/billing-api");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .with_targets(Some(vec!["orders-api".to_string()]))
            .walk()
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].display_name, "team-a/orders-api");
    }

    #[test]
    fn filtered_out_projects_are_still_not_descended_into() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), "rejected");
        mule_project(temp.path(), "rejected/nested/wanted");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .with_targets(Some(vec!["wanted".to_string()]))
            .walk()
            .unwrap();

        // "wanted" sits inside a classified project root, so it is invisible
        // even though the filter names it.
        assert!(projects.is_empty());
    }

    #[test]
    fn ignore_patterns_prune_discovery() {
        let temp = TempDir::new().unwrap();
        mule_project(temp.path(), "archive/old-api");
        mule_project(temp.path(), "live/new-api");

        let projects = ProjectWalker::new(temp.path().to_path_buf())
            .with_ignore_patterns(vec!["**/archive".to_string()])
            .walk()
            .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "new-api");
    }

    #[test]
    fn missing_root_is_fatal() {
        let err = ProjectWalker::new(PathBuf::from("/definitely/not/here"))
            .walk()
            .unwrap_err();
        assert!(matches!(err, MulemapError::RootNotFound(_)));
    }

    #[test]
    fn find_files_by_extension_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("b.xml"), "<b/>").unwrap();
        fs::write(temp.path().join("sub/a.xml"), "<a/>").unwrap();
        fs::write(temp.path().join("notes.txt"), "notes").unwrap();

        let files = find_files_by_extension(temp.path(), &["xml"]);
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("b.xml"));
        assert!(files[1].ends_with("sub/a.xml"));
    }

    #[test]
    fn count_lines_matches_line_iterator() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("one\ntwo\n"), 2);
        assert_eq!(count_lines("one\ntwo\nthree"), 3);
    }
}
