//! Version number ordering
//!
//! Package numbers are compared segment by segment:
//! - `2.1.2` > `1.1.1`, `10` > `9` (numeric segments compare as integers)
//! - `1.0.rc1` < `1.0` (alphabetic segments are prereleases and sort first)
//! - `1.0` == `1` == `1.0.0` (missing segments count as zero)
//! - `1.a` == `1.0.a` (trailing zeros before a prerelease are dropped)

use std::cmp::Ordering;

/// Numeric segments keep their digits without leading zeros, so zero is
/// the empty string and any length of digits compares exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Numeric(String),
    Alpha(String),
}

impl Segment {
    fn zero() -> Self {
        Segment::Numeric(String::new())
    }

    fn is_zero(&self) -> bool {
        matches!(self, Segment::Numeric(digits) if digits.is_empty())
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Segment::Alpha(a), Segment::Alpha(b)) => a.cmp(b),
            (Segment::Alpha(_), Segment::Numeric(_)) => Ordering::Less,
            (Segment::Numeric(_), Segment::Alpha(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A version number split into comparable segments.
#[derive(Debug, Clone)]
pub struct VersionNumber {
    segments: Vec<Segment>,
}

impl VersionNumber {
    /// Split a number at `.` and at every digit/letter boundary.
    ///
    /// Any other non-alphanumeric character also separates segments, so
    /// parsing never fails.
    pub fn parse(number: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();

        for c in number.chars() {
            if !c.is_ascii_alphanumeric() {
                push_segment(&mut segments, &mut current);
                continue;
            }
            let boundary = current
                .chars()
                .last()
                .is_some_and(|last| last.is_ascii_digit() != c.is_ascii_digit());
            if boundary {
                push_segment(&mut segments, &mut current);
            }
            current.push(c);
        }
        push_segment(&mut segments, &mut current);

        Self {
            segments: canonical_segments(segments),
        }
    }
}

/// Drop trailing zeros from the release part (before the first alphabetic
/// segment) and from the prerelease part
fn canonical_segments(mut segments: Vec<Segment>) -> Vec<Segment> {
    let split = segments
        .iter()
        .position(|s| matches!(s, Segment::Alpha(_)))
        .unwrap_or(segments.len());
    let mut prerelease = segments.split_off(split);

    trim_trailing_zeros(&mut segments);
    trim_trailing_zeros(&mut prerelease);
    segments.append(&mut prerelease);
    segments
}

fn trim_trailing_zeros(segments: &mut Vec<Segment>) {
    while segments.last().is_some_and(Segment::is_zero) {
        segments.pop();
    }
}

fn push_segment(segments: &mut Vec<Segment>, current: &mut String) {
    if current.is_empty() {
        return;
    }
    let segment = if current.chars().all(|c| c.is_ascii_digit()) {
        Segment::Numeric(current.trim_start_matches('0').to_string())
    } else {
        Segment::Alpha(current.clone())
    };
    segments.push(segment);
    current.clear();
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Segment::zero();
        let len = self.segments.len().max(other.segments.len());

        (0..len)
            .map(|i| {
                let a = self.segments.get(i).unwrap_or(&zero);
                let b = other.segments.get(i).unwrap_or(&zero);
                a.cmp(b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for VersionNumber {}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version number strings.
pub fn compare_numbers(a: &str, b: &str) -> Ordering {
    VersionNumber::parse(a).cmp(&VersionNumber::parse(b))
}
