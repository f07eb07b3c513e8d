//! Single record conversions between the LSA layouts and the unified
//! forest trust record.

use tracing::trace;
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_ndr::{
    ForestTrustData, ForestTrustDomainInfo, ForestTrustRecord, ForestTrustRecordType,
    ForestTrustScannerInfo,
};
use trustinfo_security::{DomSid, NtTime};

use crate::error::{Error, Result};
use crate::lsa::{
    ExtendedForestTrustData, ExtendedForestTrustRecord, LegacyForestTrustData,
    LegacyForestTrustRecord, LsaDomainInfo,
};

/// A size field and the sub type byte.
pub const BINARY_MIN_SIZE: usize = 5;
const BINARY_SUB_TYPE_OFFSET: usize = 4;

fn scanner_domain_info(info: &LsaDomainInfo) -> ForestTrustDomainInfo {
    ForestTrustDomainInfo {
        sid: info.domain_sid.clone().unwrap_or_else(DomSid::empty),
        dns_name: info.dns_domain_name.clone(),
        netbios_name: info.netbios_domain_name.clone(),
    }
}

fn scanner_lsa_info(info: &ForestTrustDomainInfo) -> LsaDomainInfo {
    LsaDomainInfo {
        domain_sid: (!info.sid.is_empty()).then(|| info.sid.clone()),
        dns_domain_name: info.dns_name.clone(),
        netbios_domain_name: info.netbios_name.clone(),
    }
}

/// Reinterpret an opaque binary record.
///
/// The sub type byte sits at offset 4. SCANNER_INFO payloads are upgraded
/// to a scanner info record; any other sub type above BINARY_DATA stays
/// binary data with its bytes unchanged.
pub fn resolve_binary(flags: u32, time: NtTime, binary: &[u8]) -> Result<ExtendedForestTrustRecord> {
    if binary.len() < BINARY_MIN_SIZE {
        return Err(Error::BinaryTooShort(binary.len()));
    }

    let sub_type = binary[BINARY_SUB_TYPE_OFFSET];
    if sub_type <= u8::from(ForestTrustRecordType::BinaryData) {
        return Err(Error::InvalidBinarySubType(sub_type));
    }

    let data = match ForestTrustRecordType::from(sub_type) {
        ForestTrustRecordType::ScannerInfo => {
            let scanner = ForestTrustScannerInfo::unpack(binary)?;
            ExtendedForestTrustData::ScannerInfo(scanner_lsa_info(&scanner.info))
        }
        other => {
            trace!(sub_type = %other, size = binary.len(), "keeping binary forest trust record");
            ExtendedForestTrustData::BinaryData(binary.to_vec())
        }
    };

    Ok(ExtendedForestTrustRecord::new(flags, time, data))
}

impl TryFrom<&LegacyForestTrustRecord> for ExtendedForestTrustRecord {
    type Error = Error;

    /// Binary records are resolved, so a packed SCANNER_INFO becomes a
    /// scanner info record.
    fn try_from(record: &LegacyForestTrustRecord) -> Result<Self> {
        let data = match &record.data {
            LegacyForestTrustData::TopLevelName(name) => {
                ExtendedForestTrustData::TopLevelName(name.clone())
            }
            LegacyForestTrustData::TopLevelNameEx(name) => {
                ExtendedForestTrustData::TopLevelNameEx(name.clone())
            }
            LegacyForestTrustData::DomainInfo(info) => {
                ExtendedForestTrustData::DomainInfo(info.clone())
            }
            LegacyForestTrustData::Binary { record_type, data } => {
                if *record_type <= u32::from(ForestTrustRecordType::DomainInfo) {
                    return Err(Error::InvalidBinaryRecordType(*record_type));
                }
                return resolve_binary(record.flags, record.time, data);
            }
        };
        Ok(ExtendedForestTrustRecord::new(record.flags, record.time, data))
    }
}

impl TryFrom<&ExtendedForestTrustRecord> for LegacyForestTrustRecord {
    type Error = Error;

    /// SCANNER_INFO is packed into a binary record of the same type.
    fn try_from(record: &ExtendedForestTrustRecord) -> Result<Self> {
        let data = match &record.data {
            ExtendedForestTrustData::TopLevelName(name) => {
                LegacyForestTrustData::TopLevelName(name.clone())
            }
            ExtendedForestTrustData::TopLevelNameEx(name) => {
                LegacyForestTrustData::TopLevelNameEx(name.clone())
            }
            ExtendedForestTrustData::DomainInfo(info) => {
                LegacyForestTrustData::DomainInfo(info.clone())
            }
            ExtendedForestTrustData::BinaryData(data) => LegacyForestTrustData::Binary {
                record_type: ForestTrustRecordType::BinaryData.into(),
                data: data.clone(),
            },
            ExtendedForestTrustData::ScannerInfo(info) => {
                let packed = ForestTrustData::ScannerInfo(ForestTrustScannerInfo::new(
                    scanner_domain_info(info),
                ))
                .pack()?;
                LegacyForestTrustData::Binary {
                    record_type: ForestTrustRecordType::ScannerInfo.into(),
                    data: packed,
                }
            }
        };
        Ok(LegacyForestTrustRecord::new(record.flags, record.time, data))
    }
}

impl ExtendedForestTrustRecord {
    /// Revalidate an extended record: binary data is resolved, everything
    /// else, including scanner info, is kept.
    pub fn normalize(&self) -> Result<Self> {
        match &self.data {
            ExtendedForestTrustData::BinaryData(data) => resolve_binary(self.flags, self.time, data),
            _ => Ok(self.clone()),
        }
    }
}

impl DecodableFrom<ExtendedForestTrustRecord> for ForestTrustRecord {}

impl Decoder<ExtendedForestTrustRecord, ForestTrustRecord> for ExtendedForestTrustRecord {
    type Error = Error;

    fn decode(&self) -> Result<ForestTrustRecord> {
        let data = match &self.data {
            ExtendedForestTrustData::TopLevelName(name) => ForestTrustData::TopLevelName(name.clone()),
            ExtendedForestTrustData::TopLevelNameEx(name) => {
                ForestTrustData::TopLevelNameEx(name.clone())
            }
            ExtendedForestTrustData::DomainInfo(info) => {
                let sid = info.domain_sid.clone().ok_or(Error::MissingDomainSid)?;
                ForestTrustData::DomainInfo(ForestTrustDomainInfo {
                    sid,
                    dns_name: info.dns_domain_name.clone(),
                    netbios_name: info.netbios_domain_name.clone(),
                })
            }
            ExtendedForestTrustData::BinaryData(data) => ForestTrustData::BinaryData(data.clone()),
            ExtendedForestTrustData::ScannerInfo(info) => {
                ForestTrustData::ScannerInfo(ForestTrustScannerInfo::new(scanner_domain_info(info)))
            }
        };
        Ok(ForestTrustRecord {
            flags: self.flags,
            timestamp: self.time,
            data,
        })
    }
}

impl EncodableTo<ForestTrustRecord> for ExtendedForestTrustRecord {}

impl Encoder<ForestTrustRecord, ExtendedForestTrustRecord> for ForestTrustRecord {
    type Error = Error;

    fn encode(&self) -> Result<ExtendedForestTrustRecord> {
        let data = match &self.data {
            ForestTrustData::TopLevelName(name) => ExtendedForestTrustData::TopLevelName(name.clone()),
            ForestTrustData::TopLevelNameEx(name) => {
                ExtendedForestTrustData::TopLevelNameEx(name.clone())
            }
            ForestTrustData::DomainInfo(info) => ExtendedForestTrustData::DomainInfo(LsaDomainInfo {
                domain_sid: Some(info.sid.clone()),
                dns_domain_name: info.dns_name.clone(),
                netbios_domain_name: info.netbios_name.clone(),
            }),
            ForestTrustData::BinaryData(data) => ExtendedForestTrustData::BinaryData(data.clone()),
            ForestTrustData::ScannerInfo(scanner) => {
                ExtendedForestTrustData::ScannerInfo(scanner_lsa_info(&scanner.info))
            }
            ForestTrustData::Unknown { record_type, .. } => {
                return Err(Error::UnsupportedRecordType(*record_type));
            }
        };
        Ok(ExtendedForestTrustRecord::new(self.flags, self.timestamp, data))
    }
}
