//! A single published version of a package

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

use crate::index::dependency::Dependency;
use crate::index::number::compare_numbers;

/// Platform name that means "no platform suffix"
pub const DEFAULT_PLATFORM: &str = "ruby";

/// Engine constraint that is left off info lines
const ANY_REQUIREMENT: &str = ">= 0";

/// Returns true for the platform rendered without a suffix
pub fn is_default_platform(platform: &str) -> bool {
    platform.is_empty() || platform == DEFAULT_PLATFORM
}

/// One (number, platform) pair of a package
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct VersionIdentifier {
    pub number: String,
    #[serde(default)]
    pub platform: Option<String>,
    /// Checksum of the package artifact for this version
    #[serde(default)]
    pub checksum: Option<String>,
    /// Checksum of the package's info blob as of this version
    #[serde(default)]
    pub info_checksum: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub ruby_version: Option<String>,
    #[serde(default)]
    pub rubygems_version: Option<String>,
}

impl VersionIdentifier {
    pub fn new(number: &str) -> Self {
        Self {
            number: number.to_string(),
            ..Self::default()
        }
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    pub fn with_checksum(mut self, checksum: &str) -> Self {
        self.checksum = Some(checksum.to_string());
        self
    }

    pub fn with_info_checksum(mut self, info_checksum: &str) -> Self {
        self.info_checksum = Some(info_checksum.to_string());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Total order used for listing lines
    ///
    /// Numbers compare as version numbers; numerically equal numbers fall
    /// back to the raw `(number, platform)` strings, a missing platform
    /// comparing as `""`.
    pub fn compare(&self, other: &Self) -> Ordering {
        compare_numbers(&self.number, &other.number).then_with(|| {
            let a = (self.number.as_str(), self.platform.as_deref().unwrap_or_default());
            let b = (other.number.as_str(), other.platform.as_deref().unwrap_or_default());
            a.cmp(&b)
        })
    }

    /// `number`, or `number-platform` for a non-default platform
    pub fn canonical_form(&self) -> String {
        match self.platform.as_deref() {
            Some(platform) if !is_default_platform(platform) => {
                format!("{}-{}", self.number, platform)
            }
            _ => self.number.clone(),
        }
    }

    /// Dependency tokens joined by `,`; empty when there are none
    pub fn dependency_line(&self) -> String {
        self.dependencies
            .iter()
            .map(Dependency::to_token)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Render the info line for this version
    ///
    /// Format: `{canonical} {dependencies}|checksum:{checksum}` followed by
    /// `,ruby:{constraint}` and `,rubygems:{constraint}` when those are
    /// set to something other than `>= 0`.
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "{} {}|checksum:{}",
            self.canonical_form(),
            self.dependency_line(),
            self.checksum.as_deref().unwrap_or_default()
        );

        if let Some(ruby) = engine_requirement(self.ruby_version.as_deref()) {
            line.push_str(",ruby:");
            line.push_str(ruby);
        }
        if let Some(rubygems) = engine_requirement(self.rubygems_version.as_deref()) {
            line.push_str(",rubygems:");
            line.push_str(rubygems);
        }

        line
    }
}

fn engine_requirement(requirement: Option<&str>) -> Option<&str> {
    requirement.filter(|r| *r != ANY_REQUIREMENT)
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VersionIdentifier::new("1.0"), "1.0")]
    #[case(VersionIdentifier::new("1.0").with_platform("ruby"), "1.0")]
    #[case(VersionIdentifier::new("1.0").with_platform(""), "1.0")]
    #[case(VersionIdentifier::new("1.0").with_platform("jruby"), "1.0-jruby")]
    #[case(
        VersionIdentifier::new("2.1").with_platform("x86_64-linux"),
        "2.1-x86_64-linux"
    )]
    fn canonical_form_returns_expected(
        #[case] version: VersionIdentifier,
        #[case] expected: &str,
    ) {
        assert_eq!(version.canonical_form(), expected);
        assert_eq!(version.to_string(), expected);
    }

    #[rstest]
    #[case(VersionIdentifier::new("2.1.2"), VersionIdentifier::new("1.1.1"), Ordering::Greater)]
    #[case(VersionIdentifier::new("10"), VersionIdentifier::new("9"), Ordering::Greater)]
    #[case(VersionIdentifier::new("1.1.1"), VersionIdentifier::new("1.1.1"), Ordering::Equal)]
    #[case(
        VersionIdentifier::new("2.1"),
        VersionIdentifier::new("2.1").with_platform("jruby"),
        Ordering::Less
    )]
    #[case(
        VersionIdentifier::new("2.1").with_platform("java"),
        VersionIdentifier::new("2.1").with_platform("jruby"),
        Ordering::Less
    )]
    // "ruby" renders without a suffix but still takes part in the tie-break
    #[case(
        VersionIdentifier::new("2.1").with_platform("ruby"),
        VersionIdentifier::new("2.1").with_platform("jruby"),
        Ordering::Greater
    )]
    // numerically equal numbers fall back to comparing the raw strings
    #[case(VersionIdentifier::new("1.0"), VersionIdentifier::new("1"), Ordering::Greater)]
    fn compare_returns_expected(
        #[case] a: VersionIdentifier,
        #[case] b: VersionIdentifier,
        #[case] expected: Ordering,
    ) {
        assert_eq!(a.compare(&b), expected);
        assert_eq!(b.compare(&a), expected.reverse());
    }

    #[test]
    fn dependency_line_is_empty_without_dependencies() {
        assert_eq!(VersionIdentifier::new("1.0").dependency_line(), "");
    }

    #[test]
    fn dependency_line_joins_tokens_with_comma() {
        let version = VersionIdentifier::new("1.0").with_dependencies(vec![
            Dependency::new("foo", "=1.0.1"),
            Dependency::new("bar", ">= 1.0, < 2"),
        ]);

        assert_eq!(version.dependency_line(), "foo:=1.0.1,bar:< 2&>= 1.0");
    }

    #[test]
    fn to_line_without_dependencies_keeps_separator_space() {
        let version = VersionIdentifier::new("1.0").with_checksum("abc123");

        assert_eq!(version.to_line(), "1.0 |checksum:abc123");
    }

    #[test]
    fn to_line_includes_engine_requirements_unless_unconstrained() {
        let mut version = VersionIdentifier::new("1.0")
            .with_platform("java")
            .with_checksum("abc123")
            .with_dependencies(vec![Dependency::new("foo", "=1.0.1")]);
        version.ruby_version = Some(">= 2.7".to_string());
        version.rubygems_version = Some(">= 0".to_string());

        assert_eq!(
            version.to_line(),
            "1.0-java foo:=1.0.1|checksum:abc123,ruby:>= 2.7"
        );
    }

    #[test]
    fn deserializes_with_only_number() {
        let version: VersionIdentifier = serde_json::from_str(r#"{"number": "1.0"}"#).unwrap();

        assert_eq!(version, VersionIdentifier::new("1.0"));
    }
}
