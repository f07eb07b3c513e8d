//! Domain security identifier
//!
//! ```text
//! S-<revision>-<identifier authority>-<sub authority>-...
//! ```
//!
//! The all-zero SID is the "empty" SID. The forest trust formats use it as
//! the single "no SID" sentinel shared by every wire form, and its packed
//! (dom_sid0) size is zero. Revision 0 is reserved for it: a revision 0 SID
//! with any authority or sub authority is rejected.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Maximum number of sub authorities a SID can carry.
pub const SID_MAX_SUB_AUTHS: usize = 15;

const SID_AUTHORITY_MAX: u64 = (1 << 48) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomSid {
    revision: u8,
    id_auth: [u8; 6],
    sub_auths: Vec<u32>,
}

impl DomSid {
    /// Create a SID from a numeric identifier authority.
    ///
    /// # Example
    ///
    /// ```
    /// use trustinfo_security::DomSid;
    ///
    /// let sid = DomSid::new(1, 5, vec![21, 1, 2, 3]).unwrap();
    /// assert_eq!(sid.to_string(), "S-1-5-21-1-2-3");
    /// ```
    pub fn new(revision: u8, authority: u64, sub_auths: Vec<u32>) -> Result<Self> {
        if authority > SID_AUTHORITY_MAX {
            return Err(Error::SidAuthorityOutOfRange(authority));
        }
        let bytes = authority.to_be_bytes();
        let mut id_auth = [0u8; 6];
        id_auth.copy_from_slice(&bytes[2..]);
        Self::from_raw(revision, id_auth, sub_auths)
    }

    /// Create a SID from its packed identifier authority bytes.
    pub fn from_raw(revision: u8, id_auth: [u8; 6], sub_auths: Vec<u32>) -> Result<Self> {
        if sub_auths.len() > SID_MAX_SUB_AUTHS {
            return Err(Error::SidTooManySubAuths(sub_auths.len()));
        }
        if revision == 0 && (id_auth != [0u8; 6] || !sub_auths.is_empty()) {
            return Err(Error::SidInvalidEmpty);
        }
        Ok(DomSid {
            revision,
            id_auth,
            sub_auths,
        })
    }

    /// The "no SID" sentinel.
    pub fn empty() -> Self {
        DomSid::default()
    }

    pub fn is_empty(&self) -> bool {
        self.revision == 0
    }

    pub fn revision(&self) -> u8 {
        self.revision
    }

    pub fn identifier_authority(&self) -> [u8; 6] {
        self.id_auth
    }

    /// The identifier authority as a 48-bit big-endian number.
    pub fn authority(&self) -> u64 {
        self.id_auth
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }

    pub fn sub_auths(&self) -> &[u32] {
        &self.sub_auths
    }
}

impl fmt::Display for DomSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authority = self.authority();
        if authority > u64::from(u32::MAX) {
            write!(f, "S-{}-0x{:012X}", self.revision, authority)?;
        } else {
            write!(f, "S-{}-{}", self.revision, authority)?;
        }
        for sub in &self.sub_auths {
            write!(f, "-{}", sub)?;
        }
        Ok(())
    }
}

impl FromStr for DomSid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::SidInvalidString(s.to_string());

        let rest = s
            .strip_prefix("S-")
            .or_else(|| s.strip_prefix("s-"))
            .ok_or_else(invalid)?;
        let mut parts = rest.split('-');

        let revision = parts
            .next()
            .and_then(|p| p.parse::<u8>().ok())
            .ok_or_else(invalid)?;

        let authority = parts.next().ok_or_else(invalid)?;
        let authority = match authority
            .strip_prefix("0x")
            .or_else(|| authority.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => authority.parse::<u64>(),
        }
        .map_err(|_| invalid())?;

        let sub_auths = parts
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<u32>>>()?;

        DomSid::new(revision, authority, sub_auths)
    }
}

impl Serialize for DomSid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DomSid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DomSid::from_str(&s).map_err(serde::de::Error::custom)
    }
}
