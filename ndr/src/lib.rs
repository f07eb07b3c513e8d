//! NDR schemas for the blobs an LSA stores for a trusted domain.
//!
//! - [`auth::TrustAuthInOutBlob`]: current and previous authentication
//!   secrets of one trust direction
//! - [`forest::ForestTrustInfo`]: forest trust records, and the
//!   [`forest::ForestTrustData`] union packed inside binary records
//!
//! Decoding goes through [`trustinfo::decoder::Decoder`] on `[u8]` and
//! encoding through [`trustinfo::encoder::Encoder`] into `Vec<u8>`.
//! All integers are little-endian.

#![forbid(unsafe_code)]

pub mod auth;
pub mod error;
pub mod forest;
mod primitives;

pub use auth::{AuthInfoUnion, AuthType, AuthenticationInformation, TrustAuthInOutBlob};
pub use error::{Error, Result};
pub use forest::{
    FOREST_TRUST_INFO_VERSION, ForestTrustData, ForestTrustDomainInfo, ForestTrustInfo,
    ForestTrustRecord, ForestTrustRecordType, ForestTrustScannerInfo,
};
