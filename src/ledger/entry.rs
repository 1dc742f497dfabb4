//! Ledger line format: `identifier | YYYY-MM-DD`

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One persisted publication record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    /// Well-formed `name | date` record; eligible for retention expiry
    Published { name: String, date: NaiveDate },
    /// Line with no separator or an unparseable date. Preserved verbatim,
    /// never expires, still counts as already published.
    Legacy(String),
}

impl LedgerEntry {
    pub fn published(name: &str, date: NaiveDate) -> Self {
        Self::Published {
            name: name.to_string(),
            date,
        }
    }

    /// Parse one ledger line. Never fails: anything that is not a
    /// well-formed record comes back as `Legacy`.
    pub fn parse(line: &str) -> Self {
        let Some((name, date)) = line.split_once('|') else {
            return Self::Legacy(line.to_string());
        };
        match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
            Ok(date) => Self::Published {
                name: name.trim().to_string(),
                date,
            },
            Err(_) => Self::Legacy(line.to_string()),
        }
    }

    /// Render back to one line (no trailing newline)
    pub fn render(&self) -> String {
        match self {
            Self::Published { name, date } => {
                format!("{} | {}", name, date.format(DATE_FORMAT))
            }
            Self::Legacy(raw) => raw.clone(),
        }
    }

    /// True when this entry records `candidate` as already published.
    /// Well-formed entries match on the exact identifier; legacy lines use
    /// a containment check as a compatibility shim for pre-separator
    /// history files.
    pub fn records(&self, candidate: &str) -> bool {
        match self {
            Self::Published { name, .. } => name == candidate,
            Self::Legacy(raw) => raw.contains(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_well_formed() {
        let entry = LedgerEntry::parse("a.mp4 | 2024-01-01");
        assert_eq!(entry, LedgerEntry::published("a.mp4", date("2024-01-01")));
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let entry = LedgerEntry::parse("a.mp4|2024-01-01");
        assert_eq!(entry, LedgerEntry::published("a.mp4", date("2024-01-01")));
    }

    #[test]
    fn test_parse_no_separator_is_legacy() {
        let entry = LedgerEntry::parse("old_video.mp4");
        assert_eq!(entry, LedgerEntry::Legacy("old_video.mp4".to_string()));
    }

    #[test]
    fn test_parse_bad_date_is_legacy() {
        let entry = LedgerEntry::parse("a.mp4 | not-a-date");
        assert_eq!(entry, LedgerEntry::Legacy("a.mp4 | not-a-date".to_string()));
    }

    #[test]
    fn test_render_roundtrip() {
        let entry = LedgerEntry::published("a.mp4", date("2024-01-01"));
        assert_eq!(entry.render(), "a.mp4 | 2024-01-01");
        assert_eq!(LedgerEntry::parse(&entry.render()), entry);

        let legacy = LedgerEntry::Legacy("whatever line".to_string());
        assert_eq!(LedgerEntry::parse(&legacy.render()), legacy);
    }

    #[test]
    fn test_records_exact_match_only_for_published() {
        let entry = LedgerEntry::published("extra.mp4", date("2024-01-01"));
        assert!(entry.records("extra.mp4"));
        // No substring false positives for well-formed records
        assert!(!entry.records("a.mp4"));
    }

    #[test]
    fn test_records_containment_for_legacy() {
        let legacy = LedgerEntry::Legacy("sent a.mp4 long ago".to_string());
        assert!(legacy.records("a.mp4"));
        assert!(!legacy.records("b.mp4"));
    }
}
