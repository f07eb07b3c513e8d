//! Protocol-level error classification.

use std::fmt;

/// How a conversion failure is reported to the LSA RPC layer.
///
/// Every converter error maps onto one of these kinds. Codec failures
/// (malformed or unencodable blobs) are `InvalidParameter` at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad discriminant, wrong fixed size, missing
    /// required field, undersized binary payload, sub-type mismatch.
    InvalidParameter,
    /// A discriminant the data model knows about but this version cannot
    /// convert.
    NotSupported,
}

impl ErrorKind {
    /// The NTSTATUS value the RPC layer returns for this kind.
    pub fn nt_status(self) -> u32 {
        match self {
            ErrorKind::InvalidParameter => 0xC000_000D,
            ErrorKind::NotSupported => 0xC000_00BB,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidParameter => write!(f, "NT_STATUS_INVALID_PARAMETER"),
            ErrorKind::NotSupported => write!(f, "NT_STATUS_NOT_SUPPORTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ErrorKind;

    #[rstest(kind, status, text,
        case(ErrorKind::InvalidParameter, 0xC000_000D, "NT_STATUS_INVALID_PARAMETER"),
        case(ErrorKind::NotSupported, 0xC000_00BB, "NT_STATUS_NOT_SUPPORTED"),
    )]
    fn test_error_kind_status(kind: ErrorKind, status: u32, text: &str) {
        assert_eq!(status, kind.nt_status());
        assert_eq!(text, kind.to_string());
    }
}
