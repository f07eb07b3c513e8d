//! DNS name comparison
//!
//! Names are compared label by label starting from the root, ignoring
//! ASCII case. A single trailing dot is accepted. Names that are not valid
//! DNS names (empty labels, labels longer than 63 bytes, more than 254
//! bytes overall) never match anything.

const DNS_MAX_LABEL_LEN: usize = 63;
const DNS_MAX_NAME_LEN: usize = 254;

/// Relationship between two DNS names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsCmp {
    /// Both names are the same.
    Match,
    /// The first name is below the second one (`a.example.com` vs `example.com`).
    FirstIsChild,
    /// The second name is below the first one.
    SecondIsChild,
    /// The names are unrelated, or one of them is not a valid DNS name.
    NoMatch,
}

/// Compare two DNS names.
///
/// # Example
///
/// ```
/// use trustinfo_security::{DnsCmp, dns_cmp};
///
/// assert_eq!(DnsCmp::FirstIsChild, dns_cmp("child.Example.COM", "example.com"));
/// assert_eq!(DnsCmp::NoMatch, dns_cmp("badexample.com", "example.com"));
/// ```
pub fn dns_cmp(first: &str, second: &str) -> DnsCmp {
    let (Some(first), Some(second)) = (labels(first), labels(second)) else {
        return DnsCmp::NoMatch;
    };

    let common = first
        .iter()
        .rev()
        .zip(second.iter().rev())
        .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
        .count();

    if common < first.len().min(second.len()) {
        return DnsCmp::NoMatch;
    }

    match first.len().cmp(&second.len()) {
        std::cmp::Ordering::Equal => DnsCmp::Match,
        std::cmp::Ordering::Greater => DnsCmp::FirstIsChild,
        std::cmp::Ordering::Less => DnsCmp::SecondIsChild,
    }
}

fn labels(name: &str) -> Option<Vec<&str>> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > DNS_MAX_NAME_LEN {
        return None;
    }
    let labels = name.split('.').collect::<Vec<_>>();
    if labels
        .iter()
        .any(|l| l.is_empty() || l.len() > DNS_MAX_LABEL_LEN)
    {
        return None;
    }
    Some(labels)
}
