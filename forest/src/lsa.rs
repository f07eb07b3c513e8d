//! Forest trust records as the LSA RPC layer exchanges them.
//!
//! The legacy layout (`lsa_ForestTrustRecord`) carries everything past
//! DOMAIN_INFO as opaque binary data. The extended layout
//! (`lsa_ForestTrustRecord2`) adds a first class SCANNER_INFO record.

use serde::{Deserialize, Serialize};
use trustinfo_ndr::ForestTrustRecordType;
use trustinfo_security::{DomSid, NtTime};

use crate::error::{Error, Result};

pub const LSA_TLN_DISABLED_NEW: u32 = 0x0000_0001;
pub const LSA_TLN_DISABLED_ADMIN: u32 = 0x0000_0002;
pub const LSA_TLN_DISABLED_CONFLICT: u32 = 0x0000_0004;
pub const LSA_TLN_DISABLED_MASK: u32 =
    LSA_TLN_DISABLED_NEW | LSA_TLN_DISABLED_ADMIN | LSA_TLN_DISABLED_CONFLICT;

pub const LSA_SID_DISABLED_ADMIN: u32 = 0x0000_0001;
pub const LSA_SID_DISABLED_CONFLICT: u32 = 0x0000_0002;
pub const LSA_NB_DISABLED_ADMIN: u32 = 0x0000_0004;
pub const LSA_NB_DISABLED_CONFLICT: u32 = 0x0000_0008;

/// `lsa_ForestTrustDomainInfo`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LsaDomainInfo {
    pub domain_sid: Option<DomSid>,
    pub dns_domain_name: String,
    pub netbios_domain_name: String,
}

impl LsaDomainInfo {
    pub fn new(
        domain_sid: Option<DomSid>,
        dns_domain_name: impl Into<String>,
        netbios_domain_name: impl Into<String>,
    ) -> Self {
        LsaDomainInfo {
            domain_sid,
            dns_domain_name: dns_domain_name.into(),
            netbios_domain_name: netbios_domain_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyForestTrustData {
    TopLevelName(String),
    TopLevelNameEx(String),
    DomainInfo(LsaDomainInfo),
    /// Any other record type. SCANNER_INFO travels here packed as a
    /// `ForestTrustData` union. `record_type` is above DOMAIN_INFO; build it
    /// with [`LegacyForestTrustData::binary`].
    Binary { record_type: u32, data: Vec<u8> },
}

impl LegacyForestTrustData {
    /// A binary record. Types up to DOMAIN_INFO have their own variants.
    pub fn binary(record_type: u32, data: Vec<u8>) -> Result<Self> {
        if record_type <= u32::from(ForestTrustRecordType::DomainInfo) {
            return Err(Error::InvalidBinaryRecordType(record_type));
        }
        Ok(LegacyForestTrustData::Binary { record_type, data })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyForestTrustRecord {
    pub flags: u32,
    pub time: NtTime,
    pub data: LegacyForestTrustData,
}

impl LegacyForestTrustRecord {
    pub fn new(flags: u32, time: NtTime, data: LegacyForestTrustData) -> Self {
        LegacyForestTrustRecord { flags, time, data }
    }

    pub fn record_type(&self) -> u32 {
        match &self.data {
            LegacyForestTrustData::TopLevelName(_) => ForestTrustRecordType::TopLevelName.into(),
            LegacyForestTrustData::TopLevelNameEx(_) => {
                ForestTrustRecordType::TopLevelNameEx.into()
            }
            LegacyForestTrustData::DomainInfo(_) => ForestTrustRecordType::DomainInfo.into(),
            LegacyForestTrustData::Binary { record_type, .. } => *record_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtendedForestTrustData {
    TopLevelName(String),
    TopLevelNameEx(String),
    DomainInfo(LsaDomainInfo),
    BinaryData(Vec<u8>),
    ScannerInfo(LsaDomainInfo),
}

impl ExtendedForestTrustData {
    pub fn top_level_name(&self) -> Option<&str> {
        match self {
            ExtendedForestTrustData::TopLevelName(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn top_level_name_ex(&self) -> Option<&str> {
        match self {
            ExtendedForestTrustData::TopLevelNameEx(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedForestTrustRecord {
    pub flags: u32,
    pub time: NtTime,
    pub data: ExtendedForestTrustData,
}

impl ExtendedForestTrustRecord {
    pub fn new(flags: u32, time: NtTime, data: ExtendedForestTrustData) -> Self {
        ExtendedForestTrustRecord { flags, time, data }
    }

    pub fn record_type(&self) -> ForestTrustRecordType {
        match &self.data {
            ExtendedForestTrustData::TopLevelName(_) => ForestTrustRecordType::TopLevelName,
            ExtendedForestTrustData::TopLevelNameEx(_) => ForestTrustRecordType::TopLevelNameEx,
            ExtendedForestTrustData::DomainInfo(_) => ForestTrustRecordType::DomainInfo,
            ExtendedForestTrustData::BinaryData(_) => ForestTrustRecordType::BinaryData,
            ExtendedForestTrustData::ScannerInfo(_) => ForestTrustRecordType::ScannerInfo,
        }
    }
}

/// `lsa_ForestTrustInformation`; a `None` entry is a missing record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyForestTrustInformation {
    pub entries: Vec<Option<LegacyForestTrustRecord>>,
}

impl LegacyForestTrustInformation {
    pub fn new(records: Vec<LegacyForestTrustRecord>) -> Self {
        LegacyForestTrustInformation {
            entries: records.into_iter().map(Some).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// `lsa_ForestTrustInformation2`; a `None` entry is a missing record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtendedForestTrustInformation {
    pub entries: Vec<Option<ExtendedForestTrustRecord>>,
}

impl ExtendedForestTrustInformation {
    pub fn new(records: Vec<ExtendedForestTrustRecord>) -> Self {
        ExtendedForestTrustInformation {
            entries: records.into_iter().map(Some).collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Records that are present, with their position.
    pub fn records(&self) -> impl Iterator<Item = (usize, &ExtendedForestTrustRecord)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|record| (index, record)))
    }
}
