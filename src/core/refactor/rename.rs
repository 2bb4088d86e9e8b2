//! Second pass: rename candidate paths, deepest first.

use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;

use super::report::{ChangeReport, WarningKind};
use super::scan::Candidate;
use super::spec::RenameSpec;

/// Order candidates so every descendant comes before its ancestors.
///
/// Longer path strings first. A descendant's path always extends its
/// ancestor's, so renaming in this order never invalidates a path that is
/// still waiting. Equal lengths: files before directories, then by path.
pub fn order_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(compare_candidates);
}

fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    b.path
        .as_os_str()
        .len()
        .cmp(&a.path.as_os_str().len())
        .then(a.is_dir.cmp(&b.is_dir))
        .then_with(|| a.path.cmp(&b.path))
}

/// Rename every candidate whose current base name still contains the token.
///
/// Only the final path segment changes. Existing destinations are never
/// overwritten; failures are recorded on the report and the pass moves on.
pub fn rename_candidates(
    spec: &RenameSpec,
    mut candidates: Vec<Candidate>,
    report: &mut ChangeReport,
) {
    order_candidates(&mut candidates);

    for candidate in &candidates {
        let from = &candidate.path;

        match fs::symlink_metadata(from) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                log_status!("rename", "Cannot stat {} before renaming: {}", from.display(), e);
                report.warn(WarningKind::StatFailed, from, e.to_string());
                continue;
            }
        }

        let Some(base_name) = from.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !spec.matches(base_name) {
            continue;
        }

        let (new_name, _) = spec.replace_all(base_name);
        let to = from.with_file_name(&new_name);

        match fs::symlink_metadata(&to) {
            Ok(_) => {
                log_status!(
                    "rename",
                    "{} already exists, not renaming {}",
                    to.display(),
                    from.display()
                );
                report.warn(
                    WarningKind::TargetExists,
                    from,
                    format!("Target '{}' already exists", to.display()),
                );
                continue;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                log_status!("rename", "Cannot stat {}: {}", to.display(), e);
                report.warn(WarningKind::StatFailed, &to, e.to_string());
                continue;
            }
        }

        if let Err(e) = fs::rename(from, &to) {
            log_status!(
                "rename",
                "Failed to rename {} to {}: {}",
                from.display(),
                to.display(),
                e
            );
            report.warn(
                WarningKind::RenameFailed,
                from,
                format!("rename to '{}': {}", to.display(), e),
            );
            continue;
        }

        log_status!("rename", "{} -> {}", from.display(), to.display());
        report.record_rename(from.clone(), to, candidate.is_dir);
    }
}
