//! Forest trust information of LSA trusted domains.
//!
//! The same records exist in three layouts:
//! - [`ForestTrustInfo`]: the unified form, also stored as a self
//!   describing blob
//! - [`LegacyForestTrustInformation`]: `lsa_ForestTrustInformation`, where
//!   SCANNER_INFO only exists packed into binary records
//! - [`ExtendedForestTrustInformation`]: `lsa_ForestTrustInformation2`, with
//!   first class SCANNER_INFO records
//!
//! Conversions always go through the unified form. Binary records whose
//! sub type byte says SCANNER_INFO are upgraded on the way in and packed
//! again on the way out to the legacy layout.

#![forbid(unsafe_code)]

pub mod error;
pub mod info;
pub mod lsa;
pub mod matcher;
pub mod record;

pub use error::{Error, Result};
pub use info::{
    extended_normalize, extended_to_legacy, forest_trust_info_from_extended,
    forest_trust_info_from_legacy, forest_trust_info_to_extended, forest_trust_info_to_legacy,
    legacy_to_extended,
};
pub use lsa::{
    ExtendedForestTrustData, ExtendedForestTrustInformation, ExtendedForestTrustRecord,
    LegacyForestTrustData, LegacyForestTrustInformation, LegacyForestTrustRecord, LsaDomainInfo,
};
pub use matcher::{namespace_matches, tln_ex_matches, tln_matches};
pub use record::resolve_binary;
pub use trustinfo_ndr::{
    ForestTrustData, ForestTrustDomainInfo, ForestTrustInfo, ForestTrustRecord,
    ForestTrustRecordType, ForestTrustScannerInfo,
};
