//! Error types for security value types

use thiserror::Error;

/// Result type for security value type operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    // DomSid errors
    #[error("SID: {0} sub authorities exceed the maximum of 15")]
    SidTooManySubAuths(usize),
    #[error("SID: identifier authority {0:#x} does not fit in 48 bits")]
    SidAuthorityOutOfRange(u64),
    #[error("SID: invalid string form '{0}'")]
    SidInvalidString(String),
    #[error("SID: revision 0 is reserved for the empty SID")]
    SidInvalidEmpty,
}
