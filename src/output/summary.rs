//! Text rendering of a rename run's change report.

use std::fmt::Write;
use std::path::Path;

use rebrand::refactor::{ChangeReport, RenameSpec};

/// Render the categorized summary printed after a rename run.
pub fn render(report: &ChangeReport, spec: &RenameSpec) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "--- Summary by type ---");

    if report.is_empty() {
        let _ = writeln!(out, "\nNo occurrences of '{}' were changed.", spec.from);
    }

    for (category, changes) in report.categories() {
        let _ = writeln!(out, "\n--- {} ---", category.key());

        let renames = changes.renames();
        if !renames.is_empty() {
            let _ = writeln!(out, "  Renamed:");
            for item in renames {
                let _ = writeln!(
                    out,
                    "    - '{}' -> '{}'",
                    base_name(&item.from),
                    base_name(&item.to)
                );
            }
        }

        let updates = changes.content_updates();
        if !updates.is_empty() {
            if !renames.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "  Content updated:");
            for update in updates {
                let _ = writeln!(
                    out,
                    "    - {} ({} replacement{})",
                    report.relative(&update.path).display(),
                    update.replacements,
                    if update.replacements == 1 { "" } else { "s" }
                );
            }
        }
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        let _ = writeln!(out, "\n--- Warnings ({}) ---", warnings.len());
        for warning in warnings {
            let _ = writeln!(
                out,
                "  - [{}] {}: {}",
                warning.kind.as_str(),
                report.relative(&warning.path).display(),
                warning.message
            );
        }
    }

    let _ = writeln!(out, "\n--- Done ---");
    let _ = writeln!(out, "Items renamed: {}", report.total_renamed());
    let _ = writeln!(
        out,
        "Files updated: {} ({} replacements)",
        report.total_content_updates(),
        report.total_replacements()
    );
    if !report.is_empty() {
        let _ = writeln!(out, "Review the changes carefully and rebuild your project.");
    }

    out
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebrand::refactor::WarningKind;
    use std::path::PathBuf;

    fn spec() -> RenameSpec {
        RenameSpec::new("OldApp", "NewApp").unwrap()
    }

    #[test]
    fn renders_categories_in_report_order() {
        let mut report = ChangeReport::new("/r");
        report.record_content_update(PathBuf::from("/r/OldApp.Tests/Program.cs"), 1);
        report.record_rename(
            PathBuf::from("/r/OldApp.csproj"),
            PathBuf::from("/r/NewApp.csproj"),
            false,
        );
        report.record_content_update(PathBuf::from("/r/OldApp.csproj"), 2);
        report.record_rename(
            PathBuf::from("/r/OldApp.Tests"),
            PathBuf::from("/r/NewApp.Tests"),
            true,
        );

        let text = render(&report, &spec());

        let dir_at = text.find("--- Directory ---").unwrap();
        let cs_at = text.find("--- .cs ---").unwrap();
        let csproj_at = text.find("--- .csproj ---").unwrap();
        assert!(dir_at < cs_at && cs_at < csproj_at);

        assert!(text.contains("    - 'OldApp.Tests' -> 'NewApp.Tests'"));
        assert!(text.contains("    - OldApp.Tests/Program.cs (1 replacement)"));
        assert!(text.contains("    - OldApp.csproj (2 replacements)"));
        assert!(text.contains("Items renamed: 2"));
        assert!(text.contains("Files updated: 2 (3 replacements)"));
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn renders_warnings_and_empty_runs() {
        let mut report = ChangeReport::new("/r");
        report.warn(
            WarningKind::TargetExists,
            Path::new("/r/OldApp"),
            "Target '/r/NewApp' already exists",
        );

        let text = render(&report, &spec());
        assert!(text.contains("No occurrences of 'OldApp' were changed."));
        assert!(text.contains("--- Warnings (1) ---"));
        assert!(text.contains("  - [target_exists] OldApp: Target '/r/NewApp' already exists"));
        assert!(text.contains("Items renamed: 0"));
    }
}
