//! Ordered, human-readable log of what happened during one solve.
//!
//! Entries are kept in insertion order and mirrored to `tracing` as they
//! are recorded, so a caller gets both a structured record in the outcome
//! and the usual subscriber output.

use std::fmt;

/// Pipeline stage that produced a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolvePhase {
    Roster,
    Bans,
    Relations,
    Assembly,
    Objective,
    Search,
    Extraction,
}

impl SolvePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolvePhase::Roster => "roster",
            SolvePhase::Bans => "bans",
            SolvePhase::Relations => "relations",
            SolvePhase::Assembly => "assembly",
            SolvePhase::Objective => "objective",
            SolvePhase::Search => "search",
            SolvePhase::Extraction => "extraction",
        }
    }
}

impl fmt::Display for SolvePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticLevel {
    Info,
    /// A rule was intentionally not posted.
    Skipped,
    Warning,
    Error,
}

/// One entry of the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiagnosticEntry {
    pub phase: SolvePhase,
    pub level: DiagnosticLevel,
    pub message: String,
}

impl fmt::Display for DiagnosticEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Skipped => "skipped",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Error => "error",
        };
        write!(f, "[{}] {}: {}", self.phase, level, self.message)
    }
}

/// Ordered diagnostic log.
///
/// # Example
///
/// ```
/// use matchforge_core::{DiagnosticLevel, DiagnosticLog, SolvePhase};
///
/// let mut log = DiagnosticLog::new();
/// log.info(SolvePhase::Assembly, "posted 45 uniqueness constraints");
/// log.skipped(SolvePhase::Assembly, "play-count equalization omitted");
///
/// assert_eq!(log.len(), 2);
/// assert!(log.contains(DiagnosticLevel::Skipped, "play-count"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<DiagnosticEntry>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and mirrors it to `tracing`.
    pub fn record(&mut self, phase: SolvePhase, level: DiagnosticLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            DiagnosticLevel::Info | DiagnosticLevel::Skipped => {
                tracing::info!(phase = phase.as_str(), level = ?level, "{}", message)
            }
            DiagnosticLevel::Warning => {
                tracing::warn!(phase = phase.as_str(), "{}", message)
            }
            DiagnosticLevel::Error => {
                tracing::error!(phase = phase.as_str(), "{}", message)
            }
        }
        self.entries.push(DiagnosticEntry {
            phase,
            level,
            message,
        });
    }

    pub fn info(&mut self, phase: SolvePhase, message: impl Into<String>) {
        self.record(phase, DiagnosticLevel::Info, message);
    }

    pub fn warning(&mut self, phase: SolvePhase, message: impl Into<String>) {
        self.record(phase, DiagnosticLevel::Warning, message);
    }

    pub fn skipped(&mut self, phase: SolvePhase, message: impl Into<String>) {
        self.record(phase, DiagnosticLevel::Skipped, message);
    }

    pub fn error(&mut self, phase: SolvePhase, message: impl Into<String>) {
        self.record(phase, DiagnosticLevel::Error, message);
    }

    /// Appends every entry of `other`, without mirroring them again.
    pub fn extend(&mut self, other: DiagnosticLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries at a given level.
    pub fn at_level(&self, level: DiagnosticLevel) -> impl Iterator<Item = &DiagnosticEntry> {
        self.entries.iter().filter(move |e| e.level == level)
    }

    /// Returns true if some entry at `level` contains `needle`.
    pub fn contains(&self, level: DiagnosticLevel, needle: &str) -> bool {
        self.at_level(level).any(|e| e.message.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut log = DiagnosticLog::new();
        log.info(SolvePhase::Roster, "loaded 25 players");
        log.warning(SolvePhase::Bans, "unknown player 'Nobody'");
        log.error(SolvePhase::Search, "worker 2 panicked");

        let phases: Vec<_> = log.entries().iter().map(|e| e.phase).collect();
        assert_eq!(
            phases,
            vec![SolvePhase::Roster, SolvePhase::Bans, SolvePhase::Search]
        );
        assert_eq!(log.at_level(DiagnosticLevel::Warning).count(), 1);
    }

    #[test]
    fn test_extend_appends() {
        let mut a = DiagnosticLog::new();
        a.info(SolvePhase::Assembly, "first");
        let mut b = DiagnosticLog::new();
        b.skipped(SolvePhase::Assembly, "second");
        a.extend(b);

        assert_eq!(a.len(), 2);
        assert!(a.contains(DiagnosticLevel::Skipped, "second"));
        assert!(!a.contains(DiagnosticLevel::Info, "second"));
    }

    #[test]
    fn test_display() {
        let entry = DiagnosticEntry {
            phase: SolvePhase::Objective,
            level: DiagnosticLevel::Info,
            message: "lower bound 90".to_string(),
        };
        assert_eq!(entry.to_string(), "[objective] info: lower bound 90");
    }
}
