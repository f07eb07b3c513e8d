//! # trustinfo
//!
//! Core traits shared by the trust-management marshalling crates.
//!
//! This crate defines the `Decoder` and `Encoder` traits that every
//! conversion in the workspace goes through, and the `ErrorKind`
//! classification that the converters report to the RPC layer.
//!
//! ## Overview
//!
//! Two pipelines are built on top of these traits:
//! ```text
//! trustAuthInOutBlob bytes → TrustAuthInOutBlob → AuthInfo
//! lsa_ForestTrustRecord → lsa_ForestTrustRecord2 → ForestTrustRecord
//! ```
//!
//! Each step uses the `Decoder` trait to convert from one shape to the
//! next, and the `Encoder` trait to convert in the reverse direction.
//!
//! ## Type Safety
//!
//! The traits use marker traits (`DecodableFrom` and `EncodableTo`) so that
//! only the conversions a crate explicitly declares can be called.
//!
//! ## Example
//!
//! ```ignore
//! use trustinfo::decoder::Decoder;
//! use trustinfo_ndr::TrustAuthInOutBlob;
//!
//! let blob: TrustAuthInOutBlob = bytes.as_slice().decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
pub mod status;

pub use status::ErrorKind;
