//! Project-wide token rename — rewrite file contents and rename paths.
//!
//! A run has two strictly sequential passes over one directory tree:
//! 1. `scan` walks the tree once, rewrites processable files in place and
//!    collects every path whose name contains the token.
//! 2. `rename` renames those paths deepest-first, so no pending path is
//!    invalidated by an ancestor rename.
//!
//! Both passes record into one `ChangeReport`.

mod rename;
mod report;
mod scan;
mod spec;

use std::path::Path;

use crate::defaults::RenameRules;

pub use rename::{order_candidates, rename_candidates};
pub use report::{
    extension_of, Category, CategoryChanges, ChangeReport, ContentUpdate, RenameWarning,
    RenamedItem, WarningKind,
};
pub use scan::{scan_tree, Candidate};
pub use spec::RenameSpec;

/// Run both passes over `root` and return the combined report.
pub fn run_rename(spec: &RenameSpec, root: &Path, rules: &RenameRules) -> ChangeReport {
    let mut report = ChangeReport::new(root);

    log_status!("scan", "Scanning {} for '{}'", root.display(), spec.from);
    let candidates = scan_tree(spec, root, rules, &mut report);

    log_status!("rename", "Renaming {} candidate path(s)", candidates.len());
    rename_candidates(spec, candidates, &mut report);

    report
}
