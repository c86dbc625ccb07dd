//! Line-oriented pattern rule engine
//!
//! Evaluates every rule of a profile against every line of every file.
//! Matching is line-local: deterministic, fast, and without cross-line
//! state, at the cost of signatures that span lines. Files that are not
//! valid UTF-8 are skipped so a binary asset never breaks a scan.

use crate::rules::{RuleProfile, Violation};
use crate::walker::SourceWalker;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Fatal scan errors; everything else degrades locally
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("target path does not exist: {0}")]
    TargetNotFound(String),
}

/// Result of one engine pass over a path
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Number of files read (including files with zero violations)
    pub files_scanned: usize,
    /// All violations, in file order then line order within a file
    pub violations: Vec<Violation>,
}

/// Pattern matcher parameterized by an injected rule profile
#[derive(Debug, Clone)]
pub struct PatternEngine {
    profile: RuleProfile,
}

impl PatternEngine {
    pub fn new(profile: RuleProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &RuleProfile {
        &self.profile
    }

    /// Scan every file the walker yields under `root`
    ///
    /// Errors only when the target path itself is missing; unreadable or
    /// non-text files are skipped.
    pub fn scan_path(&self, root: &Path, walker: &SourceWalker) -> Result<ScanOutcome, ScanError> {
        if !root.exists() {
            return Err(ScanError::TargetNotFound(root.display().to_string()));
        }

        let mut outcome = ScanOutcome::default();
        for path in walker.walk() {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    debug!("skipping unreadable file {:?}: {}", path, e);
                    continue;
                }
            };
            outcome.files_scanned += 1;
            let display = path.display().to_string();
            outcome
                .violations
                .extend(self.scan_text(&display, &text));
        }
        Ok(outcome)
    }

    /// Scan one already-read file body; pure apart from the rule tables
    pub fn scan_text(&self, file: &str, text: &str) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            for rule in &self.profile.rules {
                if let Some(column) = rule.first_match(line) {
                    violations.push(Violation::from_rule(rule, file, idx + 1, column, line));
                }
            }
        }
        violations
    }
}
