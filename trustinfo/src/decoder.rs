//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. It is used for every "read" direction in the workspace: wire bytes
//! into NDR structures, NDR structures into typed buffers, and older LSA
//! record layouts into newer ones.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - Performs the actual conversion
//! 2. `DecodableFrom<T>` - Marker trait constraining valid conversions
//!
//! The source may be unsized, so byte slices decode directly:
//!
//! ```no_run
//! use trustinfo::decoder::{Decoder, DecodableFrom};
//!
//! struct Header(u8);
//!
//! #[derive(Debug)]
//! struct Truncated;
//!
//! impl DecodableFrom<[u8]> for Header {}
//!
//! impl Decoder<[u8], Header> for [u8] {
//!     type Error = Truncated;
//!
//!     fn decode(&self) -> Result<Header, Self::Error> {
//!         self.first().copied().map(Header).ok_or(Truncated)
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type. The destination type must implement
/// `DecodableFrom<T>`; when several destinations exist for one source, the
/// destination is picked by type annotation at the call site.
pub trait Decoder<T: ?Sized, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is malformed for the destination type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
pub trait DecodableFrom<T: ?Sized> {}
