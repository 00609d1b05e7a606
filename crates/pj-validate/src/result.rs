//! Categorized validation outcome.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Invalidates the design
    Critical,
    /// Flags risk without invalidating
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// Validity flag plus three ordered message lists.
///
/// Merging ANDs validity and concatenates each list in merge order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    pub fn add(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Critical => {
                self.is_valid = false;
                self.errors.push(message);
            }
            Severity::Warning => self.warnings.push(message),
            Severity::Info => self.info.push(message),
        }
    }

    pub fn add_critical(&mut self, message: impl Into<String>) {
        self.add(Severity::Critical, message);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.add(Severity::Warning, message);
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.add(Severity::Info, message);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.is_valid &= other.is_valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }

    /// Same result with every message prefixed, e.g. `"Geometry: "`.
    pub fn prefixed(self, prefix: &str) -> Self {
        let tag = |list: Vec<String>| list.into_iter().map(|m| format!("{prefix}{m}")).collect();
        Self {
            is_valid: self.is_valid,
            errors: tag(self.errors),
            warnings: tag(self.warnings),
            info: tag(self.info),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.info.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    /// Every message with its severity, errors first.
    pub fn messages(&self) -> impl Iterator<Item = (Severity, &str)> + '_ {
        tagged(Severity::Critical, &self.errors)
            .chain(tagged(Severity::Warning, &self.warnings))
            .chain(tagged(Severity::Info, &self.info))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().any(|(_, m)| m.contains(needle))
    }
}

fn tagged(severity: Severity, list: &[String]) -> impl Iterator<Item = (Severity, &str)> {
    list.iter().map(move |m| (severity, m.as_str()))
}

impl FromIterator<ValidationResult> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationResult>>(iter: I) -> Self {
        let mut merged = ValidationResult::new();
        for part in iter {
            merged.merge(part);
        }
        merged
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            writeln!(f, "All parameters are valid")?;
        } else {
            writeln!(f, "Parameter validation failed")?;
        }
        for (severity, message) in self.messages() {
            writeln!(f, "  [{severity}] {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn critical_invalidates_others_do_not() {
        let mut r = ValidationResult::new();
        r.add_warning("w");
        r.add_info("i");
        assert!(r.is_valid);
        r.add_critical("c");
        assert!(!r.is_valid);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn prefix_tags_every_list() {
        let mut r = ValidationResult::new();
        r.add_critical("bad");
        r.add_info("note");
        let p = r.prefixed("Geometry: ");
        assert_eq!(p.errors, vec!["Geometry: bad".to_string()]);
        assert_eq!(p.info, vec!["Geometry: note".to_string()]);
        assert!(!p.is_valid);
    }

    fn part() -> impl Strategy<Value = ValidationResult> {
        prop::collection::vec((0u8..3, "[a-z]{1,6}"), 0..6).prop_map(|msgs| {
            let mut r = ValidationResult::new();
            for (sev, msg) in msgs {
                let severity = match sev {
                    0 => Severity::Critical,
                    1 => Severity::Warning,
                    _ => Severity::Info,
                };
                r.add(severity, msg);
            }
            r
        })
    }

    proptest! {
        #[test]
        fn merge_ands_validity_and_concatenates(a in part(), b in part()) {
            let mut merged = a.clone();
            merged.merge(b.clone());

            prop_assert_eq!(merged.is_valid, a.is_valid && b.is_valid);
            prop_assert_eq!(merged.errors.len(), a.errors.len() + b.errors.len());
            prop_assert_eq!(&merged.errors[..a.errors.len()], &a.errors[..]);
            prop_assert_eq!(&merged.warnings[a.warnings.len()..], &b.warnings[..]);
            prop_assert_eq!(merged.info.len(), a.info.len() + b.info.len());
        }

        #[test]
        fn collecting_matches_sequential_merge(parts in prop::collection::vec(part(), 0..5)) {
            let collected: ValidationResult = parts.clone().into_iter().collect();
            let mut sequential = ValidationResult::new();
            for p in parts {
                sequential.merge(p);
            }
            prop_assert_eq!(collected, sequential);
        }
    }
}
