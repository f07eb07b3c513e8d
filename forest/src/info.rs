//! Whole forest trust information conversions.
//!
//! Every layout converts through [`ForestTrustInfo`]. A failing record
//! aborts the conversion and its error is returned as is.

use tracing::debug;
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_ndr::{FOREST_TRUST_INFO_VERSION, ForestTrustInfo, ForestTrustRecord};

use crate::error::{Error, Result};
use crate::lsa::{
    ExtendedForestTrustInformation, ExtendedForestTrustRecord, LegacyForestTrustInformation,
    LegacyForestTrustRecord,
};

fn check_version(info: &ForestTrustInfo) -> Result<()> {
    if info.version != FOREST_TRUST_INFO_VERSION {
        return Err(Error::InvalidVersion(info.version));
    }
    Ok(())
}

fn legacy_record_to_unified(entry: Option<&LegacyForestTrustRecord>) -> Result<ForestTrustRecord> {
    let record = entry.ok_or(Error::NullRecord)?;
    let extended = ExtendedForestTrustRecord::try_from(record)?;
    extended.decode()
}

fn extended_record_to_unified(
    entry: Option<&ExtendedForestTrustRecord>,
) -> Result<ForestTrustRecord> {
    let record = entry.ok_or(Error::NullRecord)?;
    record.normalize()?.decode()
}

fn unified_record_to_extended(record: &ForestTrustRecord) -> Result<ExtendedForestTrustRecord> {
    record.encode()
}

fn unified_record_to_legacy(record: &ForestTrustRecord) -> Result<LegacyForestTrustRecord> {
    let extended = unified_record_to_extended(record)?;
    LegacyForestTrustRecord::try_from(&extended)
}

impl DecodableFrom<LegacyForestTrustInformation> for ForestTrustInfo {}

impl Decoder<LegacyForestTrustInformation, ForestTrustInfo> for LegacyForestTrustInformation {
    type Error = Error;

    fn decode(&self) -> Result<ForestTrustInfo> {
        let records = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                legacy_record_to_unified(entry.as_ref()).inspect_err(|e| {
                    debug!(
                        index,
                        record_type = entry.as_ref().map(|r| r.record_type()),
                        error = %e,
                        "failed to convert legacy forest trust record"
                    );
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ForestTrustInfo::new(records))
    }
}

impl EncodableTo<ForestTrustInfo> for LegacyForestTrustInformation {}

impl Encoder<ForestTrustInfo, LegacyForestTrustInformation> for ForestTrustInfo {
    type Error = Error;

    fn encode(&self) -> Result<LegacyForestTrustInformation> {
        check_version(self)?;
        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                unified_record_to_legacy(record).inspect_err(|e| {
                    debug!(
                        index,
                        record_type = %record.record_type(),
                        error = %e,
                        "failed to convert forest trust record to legacy layout"
                    );
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LegacyForestTrustInformation::new(records))
    }
}

impl DecodableFrom<ExtendedForestTrustInformation> for ForestTrustInfo {}

impl Decoder<ExtendedForestTrustInformation, ForestTrustInfo> for ExtendedForestTrustInformation {
    type Error = Error;

    fn decode(&self) -> Result<ForestTrustInfo> {
        let records = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                extended_record_to_unified(entry.as_ref()).inspect_err(|e| {
                    debug!(
                        index,
                        record_type = entry.as_ref().map(|r| u32::from(r.record_type())),
                        error = %e,
                        "failed to convert extended forest trust record"
                    );
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ForestTrustInfo::new(records))
    }
}

impl EncodableTo<ForestTrustInfo> for ExtendedForestTrustInformation {}

impl Encoder<ForestTrustInfo, ExtendedForestTrustInformation> for ForestTrustInfo {
    type Error = Error;

    fn encode(&self) -> Result<ExtendedForestTrustInformation> {
        check_version(self)?;
        let records = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                unified_record_to_extended(record).inspect_err(|e| {
                    debug!(
                        index,
                        record_type = %record.record_type(),
                        error = %e,
                        "failed to convert forest trust record to extended layout"
                    );
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ExtendedForestTrustInformation::new(records))
    }
}

/// Legacy records to unified forest trust info. Packed SCANNER_INFO
/// records are upgraded.
pub fn forest_trust_info_from_legacy(info: &LegacyForestTrustInformation) -> Result<ForestTrustInfo> {
    info.decode()
}

/// Unified forest trust info to legacy records. SCANNER_INFO records are
/// packed into binary records.
pub fn forest_trust_info_to_legacy(info: &ForestTrustInfo) -> Result<LegacyForestTrustInformation> {
    info.encode()
}

pub fn forest_trust_info_from_extended(
    info: &ExtendedForestTrustInformation,
) -> Result<ForestTrustInfo> {
    info.decode()
}

pub fn forest_trust_info_to_extended(
    info: &ForestTrustInfo,
) -> Result<ExtendedForestTrustInformation> {
    info.encode()
}

pub fn legacy_to_extended(
    info: &LegacyForestTrustInformation,
) -> Result<ExtendedForestTrustInformation> {
    let unified = forest_trust_info_from_legacy(info)?;
    forest_trust_info_to_extended(&unified)
}

pub fn extended_to_legacy(
    info: &ExtendedForestTrustInformation,
) -> Result<LegacyForestTrustInformation> {
    let unified = forest_trust_info_from_extended(info)?;
    forest_trust_info_to_legacy(&unified)
}

/// Revalidate extended records, resolving any binary data.
pub fn extended_normalize(
    info: &ExtendedForestTrustInformation,
) -> Result<ExtendedForestTrustInformation> {
    let unified = forest_trust_info_from_extended(info)?;
    forest_trust_info_to_extended(&unified)
}
