//! First pass: walk the tree once, rewrite file contents, collect rename candidates.

use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::RenameRules;
use crate::io;

use super::report::{ChangeReport, WarningKind};
use super::spec::RenameSpec;

/// A path whose name contained the token when it was discovered.
///
/// The captured state goes stale once an ancestor is renamed, so the rename
/// pass re-checks the path before touching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub is_dir: bool,
    /// Permission bits at discovery time (files on Unix only). Content
    /// rewrites put these back on the file.
    pub mode: Option<u32>,
}

/// Walk `root` depth-first, rewriting processable files and collecting candidates.
///
/// The root itself is never a candidate. Siblings are visited in file-name order.
pub fn scan_tree(
    spec: &RenameSpec,
    root: &Path,
    rules: &RenameRules,
    report: &mut ChangeReport,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    walk_recursive(root, spec, rules, &mut candidates, report);
    candidates
}

fn walk_recursive(
    dir: &Path,
    spec: &RenameSpec,
    rules: &RenameRules,
    candidates: &mut Vec<Candidate>,
    report: &mut ChangeReport,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log_status!("scan", "Cannot read directory {}: {}", dir.display(), e);
            report.warn(WarningKind::DirUnreadable, dir, e.to_string());
            return;
        }
    };

    let mut listed = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => listed.push(entry),
            Err(e) => {
                // Keep what was listed so far; the rest of this directory is lost.
                log_status!("scan", "Listing of {} interrupted: {}", dir.display(), e);
                report.warn(WarningKind::DirUnreadable, dir, e.to_string());
                break;
            }
        }
    }
    listed.sort_by_key(|entry| entry.file_name());

    for entry in listed {
        let path = entry.path();
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy().to_string();
        let name_matches = match file_name.to_str() {
            Some(n) => spec.matches(n),
            None => {
                log_status!("scan", "Name of {} is not valid UTF-8, not matching it", path.display());
                if spec.matches(&name) {
                    report.warn(
                        WarningKind::NonUtf8Name,
                        &path,
                        "Name is not valid UTF-8, not renaming it",
                    );
                }
                false
            }
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                log_status!("scan", "Cannot stat {}: {}", path.display(), e);
                report.warn(WarningKind::MetadataFailed, &path, e.to_string());
                continue;
            }
        };

        if file_type.is_dir() {
            if rules.is_ignored_dir(&name) {
                continue;
            }
            if name_matches {
                candidates.push(Candidate {
                    path: path.clone(),
                    is_dir: true,
                    mode: None,
                });
            }
            walk_recursive(&path, spec, rules, candidates, report);
            continue;
        }

        let metadata = entry.metadata();
        let captured = Candidate {
            path,
            is_dir: false,
            mode: metadata.as_ref().ok().and_then(io::permission_bits),
        };

        let rename_later = name_matches
            && match &metadata {
                Ok(_) => true,
                Err(e) => {
                    log_status!(
                        "scan",
                        "Cannot read metadata of {}, not renaming it: {}",
                        captured.path.display(),
                        e
                    );
                    report.warn(WarningKind::MetadataFailed, &captured.path, e.to_string());
                    false
                }
            };

        // Symlinks are renamed like files but their targets are never rewritten.
        if file_type.is_file() && rules.is_processable(&name) {
            rewrite_content(&captured, spec, rules, report);
        }

        if rename_later {
            candidates.push(captured);
        }
    }
}

/// Replace every occurrence of the token in a file, keeping its captured permission bits.
///
/// The update is recorded as soon as the content is on disk. Failing to put the
/// permission bits back afterwards is a separate warning next to that record.
fn rewrite_content(
    file: &Candidate,
    spec: &RenameSpec,
    rules: &RenameRules,
    report: &mut ChangeReport,
) {
    let path = file.path.as_path();
    let content = match io::read_file(path, &format!("read {}", path.display())) {
        Ok(content) => content,
        Err(err) => {
            log_status!("scan", "Failed to read {}: {}", path.display(), err.cause());
            report.warn_error(WarningKind::ReadFailed, path, &err);
            return;
        }
    };

    let (new_content, replacements) = spec.replace_all(&content);
    if replacements == 0 {
        return;
    }

    if let Err(err) = io::write_file(path, &new_content, &format!("write {}", path.display())) {
        log_status!("scan", "Failed to update {}: {}", path.display(), err.cause());
        report.warn_error(WarningKind::WriteFailed, path, &err);
        return;
    }

    log_status!("scan", "Updated {} occurrence(s) in {}", replacements, path.display());
    report.record_content_update(path.to_path_buf(), replacements);

    let mode = file.mode.unwrap_or(rules.fallback_file_mode);
    if let Err(err) = io::ensure_mode(path, mode, &format!("restore mode of {}", path.display())) {
        log_status!(
            "scan",
            "Updated {} but could not restore mode {:o}: {}",
            path.display(),
            mode,
            err.cause()
        );
        report.warn_error(WarningKind::ModeNotRestored, path, &err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::builtin_defaults;
    use crate::refactor::Category;
    use tempfile::tempdir;

    fn spec() -> RenameSpec {
        RenameSpec::new("OldApp", "NewApp").unwrap()
    }

    #[test]
    fn collects_candidates_and_rewrites_processable_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("OldApp.Tests")).unwrap();
        fs::write(root.join("OldApp.csproj"), "<Name>OldApp</Name>").unwrap();
        fs::write(
            root.join("OldApp.Tests").join("Program.cs"),
            "namespace OldApp.Tests;",
        )
        .unwrap();
        fs::write(root.join("notes.md"), "OldApp stays here").unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        let candidates = scan_tree(&spec(), root, &rules, &mut report);

        let mut found: Vec<(String, bool)> = candidates
            .iter()
            .map(|c| {
                (
                    c.path.strip_prefix(root).unwrap().display().to_string(),
                    c.is_dir,
                )
            })
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                ("OldApp.Tests".to_string(), true),
                ("OldApp.csproj".to_string(), false),
            ]
        );

        assert_eq!(
            fs::read_to_string(root.join("OldApp.csproj")).unwrap(),
            "<Name>NewApp</Name>"
        );
        assert_eq!(
            fs::read_to_string(root.join("OldApp.Tests").join("Program.cs")).unwrap(),
            "namespace NewApp.Tests;"
        );
        assert_eq!(
            fs::read_to_string(root.join("notes.md")).unwrap(),
            "OldApp stays here"
        );

        assert_eq!(report.total_content_updates(), 2);
        assert_eq!(report.total_renamed(), 0);
        assert!(report
            .get(&Category::Extension(".cs".to_string()))
            .is_some());
    }

    #[test]
    fn ignored_directories_are_not_entered() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let git = root.join(".git");
        fs::create_dir_all(git.join("OldApp")).unwrap();
        fs::write(git.join("OldApp.json"), "{\"name\": \"OldApp\"}").unwrap();
        fs::create_dir_all(root.join("bin").join("OldApp")).unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        let candidates = scan_tree(&spec(), root, &rules, &mut report);

        assert!(candidates.is_empty());
        assert!(report.is_empty());
        assert_eq!(
            fs::read_to_string(git.join("OldApp.json")).unwrap(),
            "{\"name\": \"OldApp\"}"
        );
    }

    #[test]
    fn dockerfile_is_processable_by_name() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("Dockerfile"), "COPY OldApp.dll /app\n").unwrap();
        fs::write(root.join("Makefile"), "build: OldApp\n").unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        scan_tree(&spec(), root, &rules, &mut report);

        assert_eq!(
            fs::read_to_string(root.join("Dockerfile")).unwrap(),
            "COPY NewApp.dll /app\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("Makefile")).unwrap(),
            "build: OldApp\n"
        );
        let docker = report.get(&Category::Dockerfile).unwrap();
        assert_eq!(docker.content_updates()[0].replacements, 1);
    }

    #[test]
    fn unreadable_content_is_warned_and_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("binary.json"), [0xffu8, 0xfe, 0x00, 0x81]).unwrap();
        fs::write(root.join("ok.json"), "\"OldApp\"").unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        scan_tree(&spec(), root, &rules, &mut report);

        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].kind, WarningKind::ReadFailed);
        assert!(report.warnings()[0].path.ends_with("binary.json"));
        assert_eq!(fs::read_to_string(root.join("ok.json")).unwrap(), "\"NewApp\"");
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_preserves_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("run.cs");
        fs::write(&path, "OldApp").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(dir.path());
        scan_tree(&spec(), dir.path(), &rules, &mut report);

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o750);
        assert_eq!(fs::read_to_string(&path).unwrap(), "NewApp");
    }

    #[cfg(unix)]
    fn running_as_root(dir: &Path) -> bool {
        use std::os::unix::fs::MetadataExt;
        fs::metadata(dir).map(|m| m.uid() == 0).unwrap_or(false)
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn shared_writable_file_is_recorded_without_mode_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.cs");
        fs::write(&path, "namespace OldApp;").unwrap();
        set_mode(&path, 0o666);

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(dir.path());
        scan_tree(&spec(), dir.path(), &rules, &mut report);

        assert_eq!(fs::read_to_string(&path).unwrap(), "namespace NewApp;");
        assert_eq!(report.total_content_updates(), 1);
        assert!(report.warnings().is_empty());
        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(io::permission_bits(&metadata), Some(0o666));
    }

    #[cfg(unix)]
    #[test]
    fn missing_mode_falls_back_to_configured_bits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.cs");
        fs::write(&path, "OldApp").unwrap();
        set_mode(&path, 0o600);

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(dir.path());
        let file = Candidate {
            path: path.clone(),
            is_dir: false,
            mode: None,
        };
        rewrite_content(&file, &spec(), &rules, &mut report);

        let metadata = fs::metadata(&path).unwrap();
        assert_eq!(io::permission_bits(&metadata), Some(0o644));
        assert_eq!(report.total_content_updates(), 1);
        assert!(report.warnings().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_is_warned_and_siblings_still_scanned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        if running_as_root(root) {
            return;
        }
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("OldApp.cs"), "OldApp").unwrap();
        fs::write(root.join("OldApp.json"), "\"OldApp\"").unwrap();
        set_mode(&locked, 0o000);

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        let candidates = scan_tree(&spec(), root, &rules, &mut report);
        set_mode(&locked, 0o755);

        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].kind, WarningKind::DirUnreadable);
        assert_eq!(report.warnings()[0].path, locked);
        assert_eq!(fs::read_to_string(locked.join("OldApp.cs")).unwrap(), "OldApp");

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path, root.join("OldApp.json"));
        assert_eq!(
            fs::read_to_string(root.join("OldApp.json")).unwrap(),
            "\"NewApp\""
        );
    }

    #[cfg(unix)]
    #[test]
    fn read_only_file_is_warned_and_left_unchanged() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        if running_as_root(root) {
            return;
        }
        fs::write(root.join("frozen.cs"), "OldApp").unwrap();
        set_mode(&root.join("frozen.cs"), 0o444);
        fs::write(root.join("open.cs"), "OldApp").unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        scan_tree(&spec(), root, &rules, &mut report);

        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].kind, WarningKind::WriteFailed);
        assert_eq!(report.warnings()[0].path, root.join("frozen.cs"));
        assert_eq!(fs::read_to_string(root.join("frozen.cs")).unwrap(), "OldApp");

        assert_eq!(report.total_content_updates(), 1);
        assert_eq!(fs::read_to_string(root.join("open.cs")).unwrap(), "NewApp");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_warned_only_when_they_carry_the_token() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let flagged = root.join(OsStr::from_bytes(b"OldApp-\xff.txt"));
        fs::write(&flagged, "").unwrap();
        fs::write(root.join(OsStr::from_bytes(b"plain-\xff.txt")), "").unwrap();

        let rules = builtin_defaults().rename;
        let mut report = ChangeReport::new(root);
        let candidates = scan_tree(&spec(), root, &rules, &mut report);

        assert!(candidates.is_empty());
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.warnings()[0].kind, WarningKind::NonUtf8Name);
        assert_eq!(report.warnings()[0].path, flagged);
        assert!(flagged.exists());
    }
}
