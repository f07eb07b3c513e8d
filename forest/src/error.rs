use thiserror::Error;
use trustinfo::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("forest trust record is missing")]
    NullRecord,
    #[error("domain info record without a domain SID")]
    MissingDomainSid,
    #[error("binary record of {0} bytes is too short for a sub type")]
    BinaryTooShort(usize),
    #[error("binary record claims sub type {0}")]
    InvalidBinarySubType(u8),
    #[error("record type {0} cannot be carried as binary data")]
    InvalidBinaryRecordType(u32),
    #[error("record type {0} cannot be converted")]
    UnsupportedRecordType(u8),
    #[error("unsupported forest trust info version {0}")]
    InvalidVersion(u32),
    #[error("forest trust data: {0}")]
    Codec(#[from] trustinfo_ndr::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedRecordType(_) => ErrorKind::NotSupported,
            _ => ErrorKind::InvalidParameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest(err, kind,
        case(Error::NullRecord, ErrorKind::InvalidParameter),
        case(Error::MissingDomainSid, ErrorKind::InvalidParameter),
        case(Error::BinaryTooShort(4), ErrorKind::InvalidParameter),
        case(Error::InvalidBinarySubType(3), ErrorKind::InvalidParameter),
        case(Error::InvalidBinaryRecordType(1), ErrorKind::InvalidParameter),
        case(Error::InvalidVersion(2), ErrorKind::InvalidParameter),
        case(Error::Codec(trustinfo_ndr::Error::InvalidUtf8), ErrorKind::InvalidParameter),
        case(Error::UnsupportedRecordType(9), ErrorKind::NotSupported),
    )]
    fn test_error_kind(err: Error, kind: ErrorKind) {
        assert_eq!(kind, err.kind());
    }
}
