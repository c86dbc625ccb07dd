//! Report construction and rendering
//!
//! One report shape serves every analysis mode: the lexical engine and
//! the schema validator both emit [`Violation`]s, so grouping, counting
//! and rendering live here once. Rendering does no I/O.

use crate::rules::{RuleCategory, Severity, Violation};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A finished scan: counts plus the flat violation list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Path that was scanned
    pub scanned: String,
    pub files_scanned: usize,
    /// When the report was built (RFC 3339, UTC)
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    pub critical: usize,
    pub warnings: usize,
    pub info: usize,
    pub violations: Vec<Violation>,
}

impl ScanReport {
    /// Build a report; counts are derived from the violation list so
    /// `critical + warnings + info == total == violations.len()` holds
    /// by construction
    pub fn new(scanned: &str, files_scanned: usize, violations: Vec<Violation>) -> Self {
        let critical = count(&violations, Severity::Critical);
        let warnings = count(&violations, Severity::Warning);
        let info = count(&violations, Severity::Info);
        Self {
            scanned: scanned.to_string(),
            files_scanned,
            timestamp: Utc::now(),
            total: violations.len(),
            critical,
            warnings,
            info,
            violations,
        }
    }

    /// Drop violations below a severity floor or outside a category
    /// allow-list; counts are recomputed
    pub fn filtered(
        self,
        min_severity: Option<Severity>,
        categories: &[RuleCategory],
    ) -> Self {
        let violations: Vec<Violation> = self
            .violations
            .into_iter()
            .filter(|v| min_severity.map_or(true, |floor| v.severity >= floor))
            .filter(|v| categories.is_empty() || categories.contains(&v.category))
            .collect();
        Self::new(&self.scanned, self.files_scanned, violations)
    }

    /// Render as pretty-printed JSON with the stable key set
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Render the grouped textual report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Scan of {}\n", self.scanned));
        out.push_str(&format!(
            "{} file(s) scanned, {} violation(s): {} critical, {} warning, {} info\n",
            self.files_scanned, self.total, self.critical, self.warnings, self.info
        ));

        if self.violations.is_empty() {
            out.push_str("\nNo violations found.\n");
            return out;
        }

        for file in self.files_in_order() {
            out.push_str(&format!("\n{}\n", file));
            out.push_str(&format!("{}\n", "-".repeat(file.len())));
            for v in self.violations.iter().filter(|v| v.file == file) {
                out.push_str(&format!("  line {}: [{}] {}\n", v.line, v.severity, v.message));
                if let Some(ref context) = v.context {
                    out.push_str(&format!("    context: {}\n", context));
                }
                if !v.snippet.is_empty() {
                    out.push_str(&format!("    > {}\n", v.snippet));
                }
                out.push_str(&format!("    fix: {}\n", v.fix));
            }
        }
        out
    }

    /// Gate summary for workflow use: passes iff no critical violation
    pub fn gate(&self) -> (bool, String) {
        if self.critical == 0 {
            (
                true,
                format!(
                    "PASS: no critical violations in {} file(s)",
                    self.files_scanned
                ),
            )
        } else {
            (
                false,
                format!(
                    "FAIL: {} critical violation(s) in {}",
                    self.critical, self.scanned
                ),
            )
        }
    }

    /// Keep only critical violations, for the gate's detail listing
    pub fn critical_only(self) -> Self {
        self.filtered(Some(Severity::Critical), &[])
    }

    fn files_in_order(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for v in &self.violations {
            if !seen.contains(&v.file) {
                seen.push(v.file.clone());
            }
        }
        seen
    }
}

fn count(violations: &[Violation], severity: Severity) -> usize {
    violations.iter().filter(|v| v.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleProfile, Violation};

    fn sample_violation(file: &str, line: usize, severity: Severity) -> Violation {
        let profile = RuleProfile::by_name("runtime-compatibility").unwrap();
        let mut v = Violation::from_rule(&profile.rules[0], file, line, 0, "snippet text");
        v.severity = severity;
        v
    }

    #[test]
    fn test_counts_add_up() {
        let violations = vec![
            sample_violation("a.ts", 1, Severity::Critical),
            sample_violation("a.ts", 2, Severity::Warning),
            sample_violation("b.ts", 1, Severity::Warning),
            sample_violation("b.ts", 9, Severity::Info),
        ];
        let report = ScanReport::new("src", 2, violations);
        assert_eq!(report.total, 4);
        assert_eq!(report.critical + report.warnings + report.info, report.total);
        assert_eq!(report.total, report.violations.len());
    }

    #[test]
    fn test_json_keys_are_stable() {
        let report = ScanReport::new("src", 1, vec![sample_violation("a.ts", 3, Severity::Info)]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        for key in ["scanned", "filesScanned", "timestamp", "total", "critical", "warnings", "info", "violations"] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        let v = &value["violations"][0];
        for key in ["file", "line", "column", "code", "type", "severity", "message", "fix"] {
            assert!(v.get(key).is_some(), "missing violation key {}", key);
        }
    }

    #[test]
    fn test_text_groups_by_file() {
        let violations = vec![
            sample_violation("a.ts", 1, Severity::Warning),
            sample_violation("b.ts", 2, Severity::Warning),
            sample_violation("a.ts", 5, Severity::Warning),
        ];
        let text = ScanReport::new("src", 2, violations).to_text();
        let a_pos = text.find("\na.ts\n").unwrap();
        let b_pos = text.find("\nb.ts\n").unwrap();
        assert!(a_pos < b_pos);
        // both a.ts violations render under the single a.ts header
        assert_eq!(text.matches("\na.ts\n").count(), 1);
    }

    #[test]
    fn test_gate_passes_without_criticals() {
        let report = ScanReport::new("src", 3, vec![sample_violation("a.ts", 1, Severity::Warning)]);
        let (passed, message) = report.gate();
        assert!(passed);
        assert!(message.starts_with("PASS"));
    }

    #[test]
    fn test_gate_fails_on_critical() {
        let report = ScanReport::new("src", 3, vec![sample_violation("a.ts", 1, Severity::Critical)]);
        let (passed, message) = report.gate();
        assert!(!passed);
        assert!(message.contains("1 critical"));
    }

    #[test]
    fn test_severity_floor_filter() {
        let violations = vec![
            sample_violation("a.ts", 1, Severity::Critical),
            sample_violation("a.ts", 2, Severity::Warning),
            sample_violation("a.ts", 3, Severity::Info),
        ];
        let report = ScanReport::new("src", 1, violations)
            .filtered(Some(Severity::Warning), &[]);
        assert_eq!(report.total, 2);
        assert_eq!(report.info, 0);
    }

    #[test]
    fn test_empty_report_text() {
        let report = ScanReport::new("src", 0, vec![]);
        assert!(report.to_text().contains("No violations found"));
    }
}
