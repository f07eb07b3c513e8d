use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("parser error {0:?}")]
    Parser(nom::error::ErrorKind),
    #[error("parser incomplete: {0:?}")]
    ParserIncomplete(nom::Needed),
    #[error("unknown auth type {0}")]
    UnknownAuthType(u32),
    #[error("{0} bytes left over after the last entry")]
    TrailingData(usize),
    #[error("previous offset {previous} is before current offset {current}")]
    InvalidSubcontext { current: u32, previous: u32 },
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("sid: {0} sub authorities exceed the maximum of 15")]
    SidTooManySubAuths(u8),
    #[error("sid: declared size {size} but {consumed} bytes used")]
    SidSizeMismatch { size: u32, consumed: usize },
    #[error("{0} bytes do not fit a 32-bit size field")]
    SizeOverflow(usize),
    #[error("sid: {0}")]
    Sid(#[from] trustinfo_security::Error),
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(needed) => Error::ParserIncomplete(needed),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(e.code),
        }
    }
}
