//! Top level name matching against extended forest trust information.

use trustinfo_security::{DnsCmp, dns_cmp};

use crate::lsa::{ExtendedForestTrustData, ExtendedForestTrustInformation, LSA_TLN_DISABLED_MASK};

/// Position of the first record whose name equals `tln` or is a parent of
/// it. Records with any of `disable_mask` set are skipped.
fn find_tln(
    info: &ExtendedForestTrustInformation,
    name_of: fn(&ExtendedForestTrustData) -> Option<&str>,
    disable_mask: u32,
    tln: &str,
) -> Option<usize> {
    info.records().find_map(|(index, record)| {
        if record.flags & disable_mask != 0 {
            return None;
        }
        let name = name_of(&record.data)?;
        matches!(dns_cmp(tln, name), DnsCmp::Match | DnsCmp::FirstIsChild).then_some(index)
    })
}

/// Whether `tln` is inside an enabled TOP_LEVEL_NAME.
pub fn tln_matches(info: &ExtendedForestTrustInformation, tln: &str) -> bool {
    find_tln(
        info,
        ExtendedForestTrustData::top_level_name,
        LSA_TLN_DISABLED_MASK,
        tln,
    )
    .is_some()
}

/// Whether `tln` is inside a TOP_LEVEL_NAME_EX exclusion. Exclusions are
/// never disabled.
pub fn tln_ex_matches(info: &ExtendedForestTrustInformation, tln: &str) -> bool {
    find_tln(info, ExtendedForestTrustData::top_level_name_ex, 0, tln).is_some()
}

/// Whether `tln` belongs to the forest namespace: claimed by an enabled top
/// level name and not excluded.
pub fn namespace_matches(info: &ExtendedForestTrustInformation, tln: &str) -> bool {
    !tln_ex_matches(info, tln) && tln_matches(info, tln)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use trustinfo_security::NtTime;

    use super::*;
    use crate::lsa::{
        ExtendedForestTrustRecord, LSA_TLN_DISABLED_ADMIN, LSA_TLN_DISABLED_CONFLICT,
        LSA_TLN_DISABLED_NEW, LsaDomainInfo,
    };

    fn tln(flags: u32, name: &str) -> ExtendedForestTrustRecord {
        ExtendedForestTrustRecord::new(
            flags,
            NtTime::new(0),
            ExtendedForestTrustData::TopLevelName(name.to_string()),
        )
    }

    fn tln_ex(flags: u32, name: &str) -> ExtendedForestTrustRecord {
        ExtendedForestTrustRecord::new(
            flags,
            NtTime::new(0),
            ExtendedForestTrustData::TopLevelNameEx(name.to_string()),
        )
    }

    #[rstest(name, expected,
        case("example.com", true),
        case("child.example.com", true),
        case("CHILD.Example.COM", true),
        case("deep.child.example.com.", true),
        case("com", false),
        case("badexample.com", false),
        case("example.org", false),
    )]
    fn test_tln_matches(name: &str, expected: bool) {
        let info = ExtendedForestTrustInformation::new(vec![tln(0, "example.com")]);
        assert_eq!(expected, tln_matches(&info, name));
    }

    #[rstest(flags,
        case(LSA_TLN_DISABLED_NEW),
        case(LSA_TLN_DISABLED_ADMIN),
        case(LSA_TLN_DISABLED_CONFLICT),
    )]
    fn test_tln_matches_skips_disabled(flags: u32) {
        let info = ExtendedForestTrustInformation::new(vec![tln(flags, "example.com")]);
        assert!(!tln_matches(&info, "example.com"));
        assert!(!namespace_matches(&info, "example.com"));
    }

    #[test]
    fn test_tln_matches_ignores_other_flags() {
        let info = ExtendedForestTrustInformation::new(vec![tln(0x10, "example.com")]);
        assert!(tln_matches(&info, "example.com"));
    }

    #[test]
    fn test_tln_ex_matches_ignores_disable_flags() {
        let info = ExtendedForestTrustInformation::new(vec![tln_ex(
            LSA_TLN_DISABLED_MASK,
            "lab.example.com",
        )]);
        assert!(tln_ex_matches(&info, "host.lab.example.com"));
        assert!(!tln_ex_matches(&info, "example.com"));
    }

    #[test]
    fn test_matchers_only_look_at_their_record_type() {
        let info = ExtendedForestTrustInformation::new(vec![
            tln_ex(0, "example.com"),
            ExtendedForestTrustRecord::new(
                0,
                NtTime::new(0),
                ExtendedForestTrustData::DomainInfo(LsaDomainInfo::new(
                    None,
                    "example.com",
                    "EXAMPLE",
                )),
            ),
        ]);
        assert!(!tln_matches(&info, "example.com"));

        let info = ExtendedForestTrustInformation::new(vec![tln(0, "example.com")]);
        assert!(!tln_ex_matches(&info, "example.com"));
    }

    #[rstest(records, expected,
        case(vec![tln(0, "example.com")], true),
        case(vec![tln(0, "example.com"), tln_ex(0, "child.example.com")], false),
        case(vec![tln(0, "example.com"), tln_ex(0, "example.com")], false),
        case(vec![tln(0, "example.com"), tln_ex(0, "other.example.com")], true),
        case(vec![tln_ex(0, "other.example.com")], false),
        case(vec![], false),
    )]
    fn test_namespace_matches(records: Vec<ExtendedForestTrustRecord>, expected: bool) {
        let info = ExtendedForestTrustInformation::new(records);
        assert_eq!(expected, namespace_matches(&info, "child.example.com"));
    }

    #[test]
    fn test_matchers_skip_missing_entries() {
        let info = ExtendedForestTrustInformation {
            entries: vec![None, Some(tln(0, "example.com"))],
        };
        assert!(tln_matches(&info, "child.example.com"));
        assert_eq!(
            Some(1),
            find_tln(
                &info,
                ExtendedForestTrustData::top_level_name,
                LSA_TLN_DISABLED_MASK,
                "child.example.com"
            )
        );
    }
}
