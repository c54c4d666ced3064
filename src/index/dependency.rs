//! Runtime dependency of a package version

use serde::Deserialize;

use crate::index::version::is_default_platform;

/// A dependency as listed on an info line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    /// Name of the required package
    pub name: String,
    /// Constraint list separated by `", "` (e.g. `">= 1.0, < 2"`)
    pub requirement: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
}

impl Dependency {
    pub fn new(name: &str, requirement: &str) -> Self {
        Self {
            name: name.to_string(),
            requirement: requirement.to_string(),
            platform: None,
            checksum: None,
        }
    }

    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    /// Requirement with a `-{platform}` suffix for non-default platforms
    pub fn version_and_platform(&self) -> String {
        match self.platform.as_deref() {
            Some(platform) if !is_default_platform(platform) => {
                format!("{}-{}", self.requirement, platform)
            }
            _ => self.requirement.clone(),
        }
    }

    /// Render as `name:req1&req2`, constraints sorted
    ///
    /// `foo` with `"< 2, >= 1.0"` renders as `foo:< 2&>= 1.0`.
    pub fn to_token(&self) -> String {
        let version_and_platform = self.version_and_platform();
        let mut constraints: Vec<&str> = version_and_platform.split(", ").collect();
        constraints.sort_unstable();
        format!("{}:{}", self.name, constraints.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Dependency::new("foo", "=1.0.1"), "foo:=1.0.1")]
    #[case(Dependency::new("foo", "=1.0.1").with_platform("ruby"), "foo:=1.0.1")]
    #[case(Dependency::new("bar", ">= 1.0, < 2"), "bar:< 2&>= 1.0")]
    #[case(Dependency::new("baz", "~> 3.1").with_platform("java"), "baz:~> 3.1-java")]
    #[case(Dependency::new("qux", ""), "qux:")]
    fn to_token_returns_expected(#[case] dependency: Dependency, #[case] expected: &str) {
        assert_eq!(dependency.to_token(), expected);
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let dependency: Dependency =
            serde_json::from_str(r#"{"name": "rack", "requirement": ">= 2.0"}"#).unwrap();

        assert_eq!(dependency, Dependency::new("rack", ">= 2.0"));
    }
}
