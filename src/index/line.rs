//! Versions list line rendering
//!
//! One line per package: `{name} {v1,v2,...} {info_checksum}\n`, versions
//! ascending, the checksum taken from the highest version.

use crate::index::entry::PackageEntry;
use crate::index::error::IndexError;

/// Render the line for one entry, sorting its versions first
///
/// When `recalculate` is set, or the latest version carries no info
/// checksum, the checksum is derived from the version set and stored on the
/// entry.
pub fn render_line(entry: &mut PackageEntry, recalculate: bool) -> Result<String, IndexError> {
    entry.sort_versions();

    let supplied = entry.latest()?.info_checksum.clone();
    let checksum = match supplied {
        Some(checksum) if !recalculate => checksum,
        _ => entry.calculate_info_checksum()?.to_string(),
    };

    let versions = entry
        .versions
        .iter()
        .map(|v| v.canonical_form())
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!("{} {} {}\n", entry.name, versions, checksum))
}

/// Render lines for all entries in the given order
pub fn render_lines(entries: &mut [PackageEntry], recalculate: bool) -> Result<String, IndexError> {
    entries.iter_mut().try_fold(String::new(), |mut out, entry| {
        out.push_str(&render_line(entry, recalculate)?);
        Ok(out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::dependency::Dependency;
    use crate::index::version::VersionIdentifier;

    /// Version with the info checksum the fixtures use: `abc123` + digits
    fn build_version(number: &str) -> VersionIdentifier {
        VersionIdentifier::new(number)
            .with_checksum("abc123")
            .with_info_checksum(&format!("abc123{}", number.replace('.', "")))
    }

    #[test]
    fn render_line_joins_sorted_versions_and_uses_latest_checksum() {
        let mut entry = PackageEntry::new(
            "gem2",
            vec![
                build_version("1.0.2").with_platform("arch"),
                build_version("1.0.1"),
            ],
        );

        assert_eq!(
            render_line(&mut entry, false).unwrap(),
            "gem2 1.0.1,1.0.2-arch abc123102\n"
        );
    }

    #[test]
    fn render_line_orders_versions_numerically() {
        let mut entry = PackageEntry::new(
            "test",
            vec![
                build_version("2.2"),
                build_version("1.1.1"),
                build_version("1.1.1"),
                build_version("2.1.2"),
            ],
        );

        assert_eq!(
            render_line(&mut entry, false).unwrap(),
            "test 1.1.1,1.1.1,2.1.2,2.2 abc12322\n"
        );
    }

    #[test]
    fn render_line_derives_missing_checksum() {
        let mut entry = PackageEntry::new(
            "test",
            vec![VersionIdentifier::new("1.0").with_checksum("abc123")],
        );

        let line = render_line(&mut entry, false).unwrap();

        // md5("---\n1.0 |checksum:abc123\n")
        assert_eq!(line, "test 1.0 2d7a807291c33590970cb502b112e221\n");
    }

    #[test]
    fn render_line_recalculate_overrides_supplied_checksum() {
        let mut entry = PackageEntry::new(
            "test",
            vec![VersionIdentifier::new("1.0")
                .with_checksum("abc123")
                .with_info_checksum("stale")],
        );

        let line = render_line(&mut entry, true).unwrap();

        assert_eq!(line, "test 1.0 2d7a807291c33590970cb502b112e221\n");
    }

    #[test]
    fn recalculated_checksum_does_not_depend_on_input_order() {
        let versions = vec![
            VersionIdentifier::new("2.0")
                .with_checksum("def456")
                .with_dependencies(vec![Dependency::new("foo", ">= 1.0, < 3")]),
            VersionIdentifier::new("1.0").with_checksum("abc123"),
            VersionIdentifier::new("1.5")
                .with_platform("java")
                .with_checksum("fed789"),
        ];
        let mut reversed = versions.clone();
        reversed.reverse();

        let mut forward = PackageEntry::new("test", versions);
        let mut backward = PackageEntry::new("test", reversed);
        let forward_line = render_line(&mut forward, true).unwrap();
        let backward_line = render_line(&mut backward, true).unwrap();

        assert_eq!(forward_line, backward_line);
        assert!(forward_line.starts_with("test 1.0,1.5-java,2.0 "));
    }

    #[test]
    fn render_line_fails_for_entry_without_versions() {
        let mut entry = PackageEntry::new("empty", vec![]);

        assert!(matches!(
            render_line(&mut entry, false),
            Err(IndexError::EmptyVersions { .. })
        ));
    }

    #[test]
    fn render_lines_keeps_given_order() {
        let mut entries = vec![
            PackageEntry::new("gem_b", vec![build_version("1.0")]),
            PackageEntry::new("gem_a", vec![build_version("1.0")]),
        ];

        assert_eq!(
            render_lines(&mut entries, false).unwrap(),
            "gem_b 1.0 abc12310\ngem_a 1.0 abc12310\n"
        );
    }
}
