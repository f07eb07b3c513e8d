use thiserror::Error;
use trustinfo::ErrorKind;
use trustinfo_ndr::AuthType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown auth type {0}")]
    UnknownAuthType(u32),
    #[error("{auth_type} payload must be {expected} bytes, got {actual}")]
    InvalidSize {
        auth_type: AuthType,
        expected: usize,
        actual: usize,
    },
    #[error("clear password is not valid UTF-16LE")]
    InvalidClearPassword,
    #[error("clear password is not valid UTF-8")]
    InvalidClearText,
    #[error("count is {count} but {generation} holds {len} entries")]
    CountMismatch {
        generation: &'static str,
        count: u32,
        len: usize,
    },
    #[error("trust auth blob: {0}")]
    Codec(#[from] trustinfo_ndr::Error),
}

impl Error {
    /// Every auth info failure is malformed input from the caller's point
    /// of view, including codec failures.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidParameter
    }
}
