//! Pinned-vs-latest version comparison
//!
//! Versions are compared on their leading dot-separated integer components.
//! Pre-release suffixes do not affect ordering except as a lexicographic
//! tiebreak when the numeric prefixes are equal. This is deliberately looser
//! than strict semver: manifests contain values like `3.2` or `1.0.0rc1`
//! that a strict parser would reject.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Verdict of comparing a pinned version against the registry's latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// No exact pin to compare
    Unpinned,
    /// Pinned version equals (or is ahead of) the latest release
    UpToDate,
    /// Behind within the same major version
    MinorBehind,
    /// A major version behind
    MajorBehind,
    /// Latest version unavailable (fetch failure)
    Unknown,
}

impl VersionStatus {
    /// Human-readable label for table display
    pub fn label(&self) -> &'static str {
        match self {
            VersionStatus::Unpinned => "unpinned",
            VersionStatus::UpToDate => "up to date",
            VersionStatus::MinorBehind => "minor behind",
            VersionStatus::MajorBehind => "major behind",
            VersionStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify the relationship between a pinned version and the latest release
pub fn compare(pinned: Option<&str>, latest: Option<&str>) -> VersionStatus {
    let latest = match latest {
        Some(l) => l,
        None => return VersionStatus::Unknown,
    };
    let pinned = match pinned {
        Some(p) => p,
        None => return VersionStatus::Unpinned,
    };

    let pv = ParsedVersion::parse(pinned);
    let lv = ParsedVersion::parse(latest);

    // A pin with no numeric content cannot be meaningfully compared
    if pv.numbers.is_empty() {
        return VersionStatus::Unpinned;
    }
    if lv.numbers.is_empty() {
        return VersionStatus::Unknown;
    }

    match pv.cmp(&lv) {
        Ordering::Equal => VersionStatus::UpToDate,
        // Locally pinned ahead of the registry's latest (e.g. a pre-release)
        Ordering::Greater => VersionStatus::UpToDate,
        Ordering::Less => {
            if pv.major() < lv.major() {
                VersionStatus::MajorBehind
            } else {
                VersionStatus::MinorBehind
            }
        }
    }
}

/// A version split into numeric components plus a non-numeric tail
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedVersion {
    numbers: Vec<u64>,
    tail: String,
}

impl ParsedVersion {
    fn parse(s: &str) -> Self {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);

        let mut numbers = Vec::new();
        let mut tail = String::new();

        for (i, part) in s.split('.').enumerate() {
            match part.parse::<u64>() {
                Ok(n) => numbers.push(n),
                Err(_) => {
                    // Component with a non-numeric portion: keep its leading
                    // digits, everything else becomes the tiebreak tail
                    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
                    if !digits.is_empty() {
                        if let Ok(n) = digits.parse::<u64>() {
                            numbers.push(n);
                        }
                    }
                    let rest: Vec<&str> = s.split('.').skip(i).collect();
                    tail = rest.join(".");
                    if !digits.is_empty() {
                        tail = tail[digits.len()..].to_string();
                    }
                    break;
                }
            }
        }

        Self { numbers, tail }
    }

    fn major(&self) -> u64 {
        self.numbers.first().copied().unwrap_or(0)
    }

    fn component(&self, idx: usize) -> u64 {
        // Missing components compare as zero, so 1.2 == 1.2.0
        self.numbers.get(idx).copied().unwrap_or(0)
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.tail.cmp(&other.tail)
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
