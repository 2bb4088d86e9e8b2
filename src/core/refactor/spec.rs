use crate::error::Result;
use crate::validation;

/// The token pair driving a run. Matching is exact, case-sensitive substring containment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSpec {
    pub from: String,
    pub to: String,
}

impl RenameSpec {
    /// Validate and build a spec. Both tokens must be non-empty and distinct.
    pub fn new(from: &str, to: &str) -> Result<Self> {
        validation::require_non_empty(from, "old", "Old token must not be empty")?;
        validation::require_non_empty(to, "new", "New token must not be empty")?;
        validation::require_distinct(from, to, "new", "New token must differ from the old token")?;

        Ok(RenameSpec {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(&self.from)
    }

    /// Replace every non-overlapping occurrence, returning the new text and the count.
    pub fn replace_all(&self, text: &str) -> (String, usize) {
        let count = text.matches(self.from.as_str()).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        (text.replace(&self.from, &self.to), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_tokens() {
        let err = RenameSpec::new("", "NewApp").unwrap_err();
        assert_eq!(err.details["field"], "old");

        let err = RenameSpec::new("OldApp", "").unwrap_err();
        assert_eq!(err.details["field"], "new");
    }

    #[test]
    fn rejects_identical_tokens() {
        let err = RenameSpec::new("OldApp", "OldApp").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "new");
    }

    #[test]
    fn replace_all_counts_non_overlapping_occurrences() {
        let spec = RenameSpec::new("aa", "b").unwrap();
        let (out, count) = spec.replace_all("aaaaa");
        assert_eq!(count, 2);
        assert_eq!(out, "bba");
    }

    #[test]
    fn replace_all_is_case_sensitive() {
        let spec = RenameSpec::new("OldApp", "NewApp").unwrap();
        let (out, count) = spec.replace_all("OldApp oldapp OLDAPP OldApp.Tests");
        assert_eq!(count, 2);
        assert_eq!(out, "NewApp oldapp OLDAPP NewApp.Tests");
        assert!(!spec.matches("oldapp"));
    }
}
