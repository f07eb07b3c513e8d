//! Forest trust information
//!
//! ```text
//! ForestTrustInfo {
//!     u32 version;
//!     u32 count;
//!     ForestTrustInfoRecordArmor records[count];
//! }
//!
//! ForestTrustInfoRecordArmor {
//!     u32 record_size;
//!     ForestTrustInfoRecord record;
//! }
//!
//! ForestTrustInfoRecord {
//!     u32    flags;
//!     NTTIME timestamp;
//!     u8     type;
//!     union  ForestTrustData (switch type);
//! }
//!
//! ForestTrustData:
//!     TOP_LEVEL_NAME, TOP_LEVEL_NAME_EX: { u32 size; u8 utf8[size]; }
//!     DOMAIN_INFO:  { u32 sid_size; dom_sid0 sid; string dns_name; string netbios_name; }
//!     BINARY_DATA:  { u32 size; u8 data[size]; }
//!     SCANNER_INFO: { u32 size; u8 sub_type; DOMAIN_INFO info; }
//!     default:      { u32 size; u8 data[size]; }
//! ```
//!
//! The union carries no discriminant of its own; it is always packed and
//! unpacked with a type supplied from outside.

use std::fmt;

use serde::{Deserialize, Serialize};
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_security::{DomSid, NtTime};

use crate::error::{Error, Result};
use crate::primitives::{
    Parsed, le_u8, le_u32, le_u64, parse_sid, parse_sized_bytes, parse_string, push_sid,
    push_sized_bytes, push_string, push_u32, push_u64, sid0_size, size_u32, take,
};

pub const FOREST_TRUST_INFO_VERSION: u32 = 1;

/// Record type of a forest trust record.
///
/// The same ordinals are used by the LSA record layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForestTrustRecordType {
    TopLevelName,
    TopLevelNameEx,
    DomainInfo,
    BinaryData,
    ScannerInfo,
    Unknown(u8),
}

impl From<u8> for ForestTrustRecordType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::TopLevelName,
            1 => Self::TopLevelNameEx,
            2 => Self::DomainInfo,
            3 => Self::BinaryData,
            4 => Self::ScannerInfo,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ForestTrustRecordType> for u8 {
    fn from(value: ForestTrustRecordType) -> Self {
        match value {
            ForestTrustRecordType::TopLevelName => 0,
            ForestTrustRecordType::TopLevelNameEx => 1,
            ForestTrustRecordType::DomainInfo => 2,
            ForestTrustRecordType::BinaryData => 3,
            ForestTrustRecordType::ScannerInfo => 4,
            ForestTrustRecordType::Unknown(v) => v,
        }
    }
}

impl From<ForestTrustRecordType> for u32 {
    fn from(value: ForestTrustRecordType) -> Self {
        u32::from(u8::from(value))
    }
}

impl fmt::Display for ForestTrustRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopLevelName => write!(f, "TOP_LEVEL_NAME"),
            Self::TopLevelNameEx => write!(f, "TOP_LEVEL_NAME_EX"),
            Self::DomainInfo => write!(f, "DOMAIN_INFO"),
            Self::BinaryData => write!(f, "BINARY_DATA"),
            Self::ScannerInfo => write!(f, "SCANNER_INFO"),
            Self::Unknown(v) => write!(f, "UNKNOWN({})", v),
        }
    }
}

/// Domain identity carried by DOMAIN_INFO and SCANNER_INFO records.
///
/// An absent SID is the empty sentinel ([`DomSid::empty`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForestTrustDomainInfo {
    pub sid: DomSid,
    pub dns_name: String,
    pub netbios_name: String,
}

impl ForestTrustDomainInfo {
    fn parse(input: &[u8]) -> Parsed<'_, ForestTrustDomainInfo> {
        let (input, sid_size) = le_u32(input)?;
        let (input, sid_bytes) = take(input, sid_size as usize)?;
        let sid = if sid_bytes.is_empty() {
            DomSid::empty()
        } else {
            let (rest, sid) = parse_sid(sid_bytes)?;
            if !rest.is_empty() {
                return Err(Error::SidSizeMismatch {
                    size: sid_size,
                    consumed: sid_bytes.len() - rest.len(),
                });
            }
            sid
        };
        let (input, dns_name) = parse_string(input)?;
        let (input, netbios_name) = parse_string(input)?;

        Ok((
            input,
            ForestTrustDomainInfo {
                sid,
                dns_name,
                netbios_name,
            },
        ))
    }

    fn push(&self, out: &mut Vec<u8>) -> Result<()> {
        push_u32(out, size_u32(sid0_size(&self.sid))?);
        if !self.sid.is_empty() {
            push_sid(out, &self.sid);
        }
        push_string(out, &self.dns_name)?;
        push_string(out, &self.netbios_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestTrustScannerInfo {
    pub sub_type: ForestTrustRecordType,
    pub info: ForestTrustDomainInfo,
}

impl ForestTrustScannerInfo {
    pub fn new(info: ForestTrustDomainInfo) -> Self {
        ForestTrustScannerInfo {
            sub_type: ForestTrustRecordType::ScannerInfo,
            info,
        }
    }

    /// Unpack the SCANNER_INFO arm of a union blob. The sub type is the
    /// byte at offset 4.
    pub fn unpack(input: &[u8]) -> Result<Self> {
        let (_, scanner) = Self::parse(input)?;
        Ok(scanner)
    }

    fn parse(input: &[u8]) -> Parsed<'_, ForestTrustScannerInfo> {
        let (input, body) = parse_sized_bytes(input)?;
        let (body, sub_type) = le_u8(body)?;
        let (_, info) = ForestTrustDomainInfo::parse(body)?;
        Ok((
            input,
            ForestTrustScannerInfo {
                sub_type: ForestTrustRecordType::from(sub_type),
                info,
            },
        ))
    }
}

/// Payload of a forest trust record, one variant per record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForestTrustData {
    TopLevelName(String),
    TopLevelNameEx(String),
    DomainInfo(ForestTrustDomainInfo),
    BinaryData(Vec<u8>),
    ScannerInfo(ForestTrustScannerInfo),
    /// A record type this version does not know, kept as opaque bytes.
    Unknown { record_type: u8, data: Vec<u8> },
}

impl ForestTrustData {
    pub fn record_type(&self) -> ForestTrustRecordType {
        match self {
            ForestTrustData::TopLevelName(_) => ForestTrustRecordType::TopLevelName,
            ForestTrustData::TopLevelNameEx(_) => ForestTrustRecordType::TopLevelNameEx,
            ForestTrustData::DomainInfo(_) => ForestTrustRecordType::DomainInfo,
            ForestTrustData::BinaryData(_) => ForestTrustRecordType::BinaryData,
            ForestTrustData::ScannerInfo(_) => ForestTrustRecordType::ScannerInfo,
            ForestTrustData::Unknown { record_type, .. } => {
                ForestTrustRecordType::from(*record_type)
            }
        }
    }

    /// Unpack a union blob using the externally supplied record type.
    ///
    /// Trailing bytes after the selected arm are ignored.
    pub fn unpack(input: &[u8], record_type: ForestTrustRecordType) -> Result<Self> {
        let (_, data) = Self::parse(input, record_type)?;
        Ok(data)
    }

    /// Pack the union; the record type is not written.
    pub fn pack(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.push(&mut out)?;
        Ok(out)
    }

    fn parse(input: &[u8], record_type: ForestTrustRecordType) -> Parsed<'_, Self> {
        match record_type {
            ForestTrustRecordType::TopLevelName => {
                let (input, name) = parse_string(input)?;
                Ok((input, ForestTrustData::TopLevelName(name)))
            }
            ForestTrustRecordType::TopLevelNameEx => {
                let (input, name) = parse_string(input)?;
                Ok((input, ForestTrustData::TopLevelNameEx(name)))
            }
            ForestTrustRecordType::DomainInfo => {
                let (input, info) = ForestTrustDomainInfo::parse(input)?;
                Ok((input, ForestTrustData::DomainInfo(info)))
            }
            ForestTrustRecordType::BinaryData => {
                let (input, data) = parse_sized_bytes(input)?;
                Ok((input, ForestTrustData::BinaryData(data.to_vec())))
            }
            ForestTrustRecordType::ScannerInfo => {
                let (input, scanner) = ForestTrustScannerInfo::parse(input)?;
                Ok((input, ForestTrustData::ScannerInfo(scanner)))
            }
            ForestTrustRecordType::Unknown(record_type) => {
                let (input, data) = parse_sized_bytes(input)?;
                Ok((
                    input,
                    ForestTrustData::Unknown {
                        record_type,
                        data: data.to_vec(),
                    },
                ))
            }
        }
    }

    fn push(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            ForestTrustData::TopLevelName(name) | ForestTrustData::TopLevelNameEx(name) => {
                push_string(out, name)
            }
            ForestTrustData::DomainInfo(info) => info.push(out),
            ForestTrustData::BinaryData(data) | ForestTrustData::Unknown { data, .. } => {
                push_sized_bytes(out, data)
            }
            ForestTrustData::ScannerInfo(scanner) => {
                let mut body = vec![u8::from(scanner.sub_type)];
                scanner.info.push(&mut body)?;
                push_sized_bytes(out, &body)
            }
        }
    }
}

/// A forest trust record in the unified form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestTrustRecord {
    pub flags: u32,
    pub timestamp: NtTime,
    pub data: ForestTrustData,
}

impl ForestTrustRecord {
    pub fn record_type(&self) -> ForestTrustRecordType {
        self.data.record_type()
    }

    fn parse(input: &[u8]) -> Parsed<'_, ForestTrustRecord> {
        let (input, flags) = le_u32(input)?;
        let (input, timestamp) = le_u64(input)?;
        let (input, record_type) = le_u8(input)?;
        let (input, data) = ForestTrustData::parse(input, ForestTrustRecordType::from(record_type))?;
        Ok((
            input,
            ForestTrustRecord {
                flags,
                timestamp: NtTime::new(timestamp),
                data,
            },
        ))
    }

    fn push(&self, out: &mut Vec<u8>) -> Result<()> {
        push_u32(out, self.flags);
        push_u64(out, self.timestamp.ticks());
        out.push(u8::from(self.record_type()));
        self.data.push(out)
    }
}

/// Forest trust information: the canonical form every LSA layout converts
/// through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestTrustInfo {
    pub version: u32,
    pub records: Vec<ForestTrustRecord>,
}

impl ForestTrustInfo {
    pub fn new(records: Vec<ForestTrustRecord>) -> Self {
        ForestTrustInfo {
            version: FOREST_TRUST_INFO_VERSION,
            records,
        }
    }

    /// Decode the self-describing blob form.
    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        blob.decode()
    }

    pub fn to_blob(&self) -> Result<Vec<u8>> {
        self.encode()
    }
}

impl Default for ForestTrustInfo {
    fn default() -> Self {
        ForestTrustInfo::new(Vec::new())
    }
}

impl DecodableFrom<[u8]> for ForestTrustInfo {}

impl Decoder<[u8], ForestTrustInfo> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<ForestTrustInfo> {
        let (input, version) = le_u32(self)?;
        let (mut input, count) = le_u32(input)?;

        let mut records = Vec::new();
        for _ in 0..count {
            let (rest, record_size) = le_u32(input)?;
            let (rest, body) = take(rest, record_size as usize)?;
            let (_, record) = ForestTrustRecord::parse(body)?;
            records.push(record);
            input = rest;
        }

        Ok(ForestTrustInfo { version, records })
    }
}

impl EncodableTo<ForestTrustInfo> for Vec<u8> {}

impl Encoder<ForestTrustInfo, Vec<u8>> for ForestTrustInfo {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        push_u32(&mut out, self.version);
        push_u32(&mut out, size_u32(self.records.len())?);
        for record in &self.records {
            let mut body = Vec::new();
            record.push(&mut body)?;
            push_sized_bytes(&mut out, &body)?;
        }
        Ok(out)
    }
}
