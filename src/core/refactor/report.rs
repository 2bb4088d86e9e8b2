//! Change report: what a run rewrote and renamed, grouped by category.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;

// ============================================================================
// Categories
// ============================================================================

/// Report grouping key derived from a path's directory-or-extension identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Directory,
    Dockerfile,
    NoExtension,
    /// Extension including its leading dot, e.g. `.csproj`.
    Extension(String),
}

impl Category {
    pub fn for_path(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            return Category::Directory;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if name == "Dockerfile" {
            return Category::Dockerfile;
        }
        match extension_of(&name) {
            Some(ext) => Category::Extension(ext.to_string()),
            None => Category::NoExtension,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Category::Directory => "Directory",
            Category::Dockerfile => "Dockerfile",
            Category::NoExtension => "(no extension)",
            Category::Extension(ext) => ext,
        }
    }
}

impl Ord for Category {
    /// `Directory` first, everything else by key.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Directory, Category::Directory) => Ordering::Equal,
            (Category::Directory, _) => Ordering::Less,
            (_, Category::Directory) => Ordering::Greater,
            _ => self.key().cmp(other.key()),
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Extension of a file name: everything from the last `.` on, dot included.
///
/// Dotfiles count as their own extension (`.gitignore` -> `.gitignore`).
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|idx| &file_name[idx..])
}

// ============================================================================
// Records
// ============================================================================

/// A path rename that succeeded on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedItem {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A file whose content was rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUpdate {
    pub path: PathBuf,
    pub replacements: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    DirUnreadable,
    MetadataFailed,
    ReadFailed,
    WriteFailed,
    ModeNotRestored,
    NonUtf8Name,
    StatFailed,
    TargetExists,
    RenameFailed,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::DirUnreadable => "dir_unreadable",
            WarningKind::MetadataFailed => "metadata_failed",
            WarningKind::ReadFailed => "read_failed",
            WarningKind::WriteFailed => "write_failed",
            WarningKind::ModeNotRestored => "mode_not_restored",
            WarningKind::NonUtf8Name => "non_utf8_name",
            WarningKind::StatFailed => "stat_failed",
            WarningKind::TargetExists => "target_exists",
            WarningKind::RenameFailed => "rename_failed",
        }
    }
}

/// An item that was skipped, with the path and cause.
#[derive(Debug, Clone)]
pub struct RenameWarning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub message: String,
}

/// Records of one category, each list kept sorted by path.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    renames: Vec<RenamedItem>,
    content_updates: Vec<ContentUpdate>,
}

impl CategoryChanges {
    pub fn renames(&self) -> &[RenamedItem] {
        &self.renames
    }

    pub fn content_updates(&self) -> &[ContentUpdate] {
        &self.content_updates
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.content_updates.is_empty()
    }

    fn push_rename(&mut self, item: RenamedItem) {
        let idx = self.renames.partition_point(|r| r.from <= item.from);
        self.renames.insert(idx, item);
    }

    fn push_content_update(&mut self, update: ContentUpdate) {
        let idx = self
            .content_updates
            .partition_point(|u| u.path <= update.path);
        self.content_updates.insert(idx, update);
    }
}

// ============================================================================
// Report
// ============================================================================

/// Accumulates everything a run did. Shared by the scan and rename passes.
#[derive(Debug, Clone)]
pub struct ChangeReport {
    root: PathBuf,
    categories: BTreeMap<Category, CategoryChanges>,
    warnings: Vec<RenameWarning>,
}

impl ChangeReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ChangeReport {
            root: root.into(),
            categories: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get-or-create the changes bucket for `category`.
    pub fn category_mut(&mut self, category: Category) -> &mut CategoryChanges {
        self.categories.entry(category).or_default()
    }

    pub fn get(&self, category: &Category) -> Option<&CategoryChanges> {
        self.categories.get(category)
    }

    pub fn record_content_update(&mut self, path: PathBuf, replacements: usize) {
        let category = Category::for_path(&path, false);
        self.category_mut(category)
            .push_content_update(ContentUpdate { path, replacements });
    }

    /// Record a completed rename, categorized by the original path.
    pub fn record_rename(&mut self, from: PathBuf, to: PathBuf, is_dir: bool) {
        let category = Category::for_path(&from, is_dir);
        self.category_mut(category)
            .push_rename(RenamedItem { from, to });
    }

    pub fn warn(&mut self, kind: WarningKind, path: &Path, message: impl Into<String>) {
        self.warnings.push(RenameWarning {
            kind,
            path: path.to_path_buf(),
            message: message.into(),
        });
    }

    pub fn warn_error(&mut self, kind: WarningKind, path: &Path, err: &Error) {
        self.warn(kind, path, err.cause());
    }

    /// Non-empty categories, `Directory` first, then by key.
    pub fn categories(&self) -> impl Iterator<Item = (&Category, &CategoryChanges)> {
        self.categories.iter().filter(|(_, changes)| !changes.is_empty())
    }

    pub fn warnings(&self) -> &[RenameWarning] {
        &self.warnings
    }

    pub fn total_renamed(&self) -> usize {
        self.categories.values().map(|c| c.renames.len()).sum()
    }

    pub fn total_content_updates(&self) -> usize {
        self.categories.values().map(|c| c.content_updates.len()).sum()
    }

    pub fn total_replacements(&self) -> usize {
        self.categories
            .values()
            .flat_map(|c| c.content_updates.iter())
            .map(|u| u.replacements)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_renamed() == 0 && self.total_content_updates() == 0
    }

    /// `path` relative to the report root, or unchanged if it lies outside it.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
