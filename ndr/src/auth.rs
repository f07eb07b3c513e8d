//! Trust authentication blobs
//!
//! ```text
//! trustAuthInOutBlob {
//!     u32 count;
//!     u32 current_offset;   // 12 when count > 0, else 0
//!     u32 previous_offset;  // 12 + size(current) when count > 0, else 0
//!     AuthenticationInformationArray current;   // previous_offset - current_offset bytes
//!     AuthenticationInformationArray previous;  // remaining bytes
//! }
//!
//! AuthenticationInformation {
//!     NTTIME LastUpdateTime;
//!     u32    AuthType;
//!     union  AuthInfo (switch AuthType);
//!     pad to 4 bytes;
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_security::NtTime;

use crate::error::{Error, Result};
use crate::primitives::{
    Parsed, align_padding, le_u32, le_u64, parse_sized_bytes, push_sized_bytes, push_u32,
    push_u64, size_u32, take,
};

pub const TRUST_AUTH_TYPE_NONE: u32 = 0;
pub const TRUST_AUTH_TYPE_NT4OWF: u32 = 1;
pub const TRUST_AUTH_TYPE_CLEAR: u32 = 2;
pub const TRUST_AUTH_TYPE_VERSION: u32 = 3;

/// Width of an NT4 one-way-function hash.
pub const NT4OWF_SIZE: u32 = 16;
/// Width of a trust password version number.
pub const VERSION_SIZE: u32 = 4;

// NTTIME + AuthType + the smallest union arm.
const AUTH_INFO_MIN_SIZE: usize = 16;
const TRUST_AUTH_HEADER_SIZE: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    None,
    Nt4Owf,
    Clear,
    Version,
}

impl TryFrom<u32> for AuthType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            TRUST_AUTH_TYPE_NONE => Ok(AuthType::None),
            TRUST_AUTH_TYPE_NT4OWF => Ok(AuthType::Nt4Owf),
            TRUST_AUTH_TYPE_CLEAR => Ok(AuthType::Clear),
            TRUST_AUTH_TYPE_VERSION => Ok(AuthType::Version),
            _ => Err(Error::UnknownAuthType(value)),
        }
    }
}

impl From<AuthType> for u32 {
    fn from(value: AuthType) -> Self {
        match value {
            AuthType::None => TRUST_AUTH_TYPE_NONE,
            AuthType::Nt4Owf => TRUST_AUTH_TYPE_NT4OWF,
            AuthType::Clear => TRUST_AUTH_TYPE_CLEAR,
            AuthType::Version => TRUST_AUTH_TYPE_VERSION,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::None => write!(f, "NONE"),
            AuthType::Nt4Owf => write!(f, "NT4OWF"),
            AuthType::Clear => write!(f, "CLEAR"),
            AuthType::Version => write!(f, "VERSION"),
        }
    }
}

/// The `AuthInfo` union of `AuthenticationInformation`, as it appears on the wire.
///
/// The size fields of the fixed-width arms are kept as read; they are
/// always written back as 0, 16 and 4.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthInfoUnion {
    None { size: u32 },
    Nt4Owf { size: u32, hash: [u8; 16] },
    /// UTF-16LE password bytes.
    Clear { password: Vec<u8> },
    Version { size: u32, version: u32 },
}

impl AuthInfoUnion {
    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthInfoUnion::None { .. } => AuthType::None,
            AuthInfoUnion::Nt4Owf { .. } => AuthType::Nt4Owf,
            AuthInfoUnion::Clear { .. } => AuthType::Clear,
            AuthInfoUnion::Version { .. } => AuthType::Version,
        }
    }
}

impl fmt::Debug for AuthInfoUnion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthInfoUnion::None { size } => f.debug_struct("None").field("size", size).finish(),
            AuthInfoUnion::Nt4Owf { size, .. } => f
                .debug_struct("Nt4Owf")
                .field("size", size)
                .field("hash", &"<redacted>")
                .finish(),
            AuthInfoUnion::Clear { password } => f
                .debug_struct("Clear")
                .field("size", &password.len())
                .field("password", &"<redacted>")
                .finish(),
            AuthInfoUnion::Version { size, version } => f
                .debug_struct("Version")
                .field("size", size)
                .field("version", version)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationInformation {
    pub last_update_time: NtTime,
    pub auth_info: AuthInfoUnion,
}

impl AuthenticationInformation {
    fn parse(input: &[u8]) -> Parsed<'_, AuthenticationInformation> {
        let (input, last_update_time) = le_u64(input)?;
        let (input, auth_type) = le_u32(input)?;
        let (input, auth_info) = match AuthType::try_from(auth_type)? {
            AuthType::None => {
                let (input, size) = le_u32(input)?;
                (input, AuthInfoUnion::None { size })
            }
            AuthType::Nt4Owf => {
                let (input, size) = le_u32(input)?;
                let (input, data) = take(input, NT4OWF_SIZE as usize)?;
                let mut hash = [0u8; 16];
                hash.copy_from_slice(data);
                (input, AuthInfoUnion::Nt4Owf { size, hash })
            }
            AuthType::Clear => {
                let (input, password) = parse_sized_bytes(input)?;
                (
                    input,
                    AuthInfoUnion::Clear {
                        password: password.to_vec(),
                    },
                )
            }
            AuthType::Version => {
                let (input, size) = le_u32(input)?;
                let (input, version) = le_u32(input)?;
                (input, AuthInfoUnion::Version { size, version })
            }
        };

        Ok((
            input,
            AuthenticationInformation {
                last_update_time: NtTime::new(last_update_time),
                auth_info,
            },
        ))
    }

    fn push(&self, out: &mut Vec<u8>) -> Result<()> {
        push_u64(out, self.last_update_time.ticks());
        push_u32(out, self.auth_info.auth_type().into());
        match &self.auth_info {
            AuthInfoUnion::None { .. } => push_u32(out, 0),
            AuthInfoUnion::Nt4Owf { hash, .. } => {
                push_u32(out, NT4OWF_SIZE);
                out.extend_from_slice(hash);
            }
            AuthInfoUnion::Clear { password } => push_sized_bytes(out, password)?,
            AuthInfoUnion::Version { version, .. } => {
                push_u32(out, VERSION_SIZE);
                push_u32(out, *version);
            }
        }
        Ok(())
    }
}

/// Entries are read until the array is used up; each entry is padded to 4
/// bytes relative to the start of the array.
fn parse_array(data: &[u8]) -> Result<Vec<AuthenticationInformation>> {
    let mut entries = Vec::new();
    let mut input = data;
    while !input.is_empty() {
        if input.len() < AUTH_INFO_MIN_SIZE {
            return Err(Error::TrailingData(input.len()));
        }
        let (rest, entry) = AuthenticationInformation::parse(input)?;
        let padding = align_padding(data.len() - rest.len(), 4).min(rest.len());
        let (rest, _) = take(rest, padding)?;
        entries.push(entry);
        input = rest;
    }
    Ok(entries)
}

fn push_array(entries: &[AuthenticationInformation]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for entry in entries {
        entry.push(&mut out)?;
        out.resize(out.len() + align_padding(out.len(), 4), 0);
    }
    Ok(out)
}

/// Current and previous generations of one trust direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustAuthInOutBlob {
    pub count: u32,
    pub current: Vec<AuthenticationInformation>,
    pub previous: Vec<AuthenticationInformation>,
}

impl DecodableFrom<[u8]> for TrustAuthInOutBlob {}

impl Decoder<[u8], TrustAuthInOutBlob> for [u8] {
    type Error = Error;

    fn decode(&self) -> Result<TrustAuthInOutBlob> {
        let (input, count) = le_u32(self)?;
        let (input, current_offset) = le_u32(input)?;
        let (input, previous_offset) = le_u32(input)?;
        let current_size =
            previous_offset
                .checked_sub(current_offset)
                .ok_or(Error::InvalidSubcontext {
                    current: current_offset,
                    previous: previous_offset,
                })?;
        let (previous, current) = take(input, current_size as usize)?;

        Ok(TrustAuthInOutBlob {
            count,
            current: parse_array(current)?,
            previous: parse_array(previous)?,
        })
    }
}

impl EncodableTo<TrustAuthInOutBlob> for Vec<u8> {}

impl Encoder<TrustAuthInOutBlob, Vec<u8>> for TrustAuthInOutBlob {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let current = push_array(&self.current)?;
        let previous = push_array(&self.previous)?;

        let (current_offset, previous_offset) = if self.count > 0 {
            let previous_offset = TRUST_AUTH_HEADER_SIZE
                .checked_add(size_u32(current.len())?)
                .ok_or(Error::SizeOverflow(current.len()))?;
            (TRUST_AUTH_HEADER_SIZE, previous_offset)
        } else {
            (0, 0)
        };

        let mut out = Vec::with_capacity(12 + current.len() + previous.len());
        push_u32(&mut out, self.count);
        push_u32(&mut out, current_offset);
        push_u32(&mut out, previous_offset);
        out.extend_from_slice(&current);
        out.extend_from_slice(&previous);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn nt4owf_entry(time: u64, fill: u8) -> AuthenticationInformation {
        AuthenticationInformation {
            last_update_time: NtTime::new(time),
            auth_info: AuthInfoUnion::Nt4Owf {
                size: NT4OWF_SIZE,
                hash: [fill; 16],
            },
        }
    }

    #[rstest(value, expected,
        case(0, AuthType::None),
        case(1, AuthType::Nt4Owf),
        case(2, AuthType::Clear),
        case(3, AuthType::Version),
    )]
    fn test_auth_type_from_u32(value: u32, expected: AuthType) {
        assert_eq!(expected, AuthType::try_from(value).unwrap());
        assert_eq!(value, u32::from(expected));
    }

    #[test]
    fn test_auth_type_unknown() {
        assert_eq!(Err(Error::UnknownAuthType(4)), AuthType::try_from(4));
    }

    #[test]
    fn test_clear_entry_is_padded() {
        // "ab" in UTF-16LE is 4 bytes, "a" is 2 bytes and needs 2 bytes of padding.
        let entries = vec![
            AuthenticationInformation {
                last_update_time: NtTime::new(1),
                auth_info: AuthInfoUnion::Clear {
                    password: vec![0x61, 0x00],
                },
            },
            AuthenticationInformation {
                last_update_time: NtTime::new(2),
                auth_info: AuthInfoUnion::Version {
                    size: VERSION_SIZE,
                    version: 7,
                },
            },
        ];
        let bytes = push_array(&entries).unwrap();
        assert_eq!(40, bytes.len());
        assert_eq!(&[0x61, 0x00, 0x00, 0x00], &bytes[16..20]);
        assert_eq!(entries, parse_array(&bytes).unwrap());
    }

    #[test]
    fn test_trust_auth_blob_layout() {
        let blob = TrustAuthInOutBlob {
            count: 1,
            current: vec![nt4owf_entry(10, 0xaa)],
            previous: vec![nt4owf_entry(5, 0xbb)],
        };
        let bytes: Vec<u8> = blob.encode().unwrap();

        // header + two 32 byte entries
        assert_eq!(12 + 32 + 32, bytes.len());
        assert_eq!(&[0x01, 0x00, 0x00, 0x00], &bytes[0..4]);
        assert_eq!(&[0x0c, 0x00, 0x00, 0x00], &bytes[4..8]);
        assert_eq!(&[0x2c, 0x00, 0x00, 0x00], &bytes[8..12]);

        let decoded: TrustAuthInOutBlob = bytes.as_slice().decode().unwrap();
        assert_eq!(blob, decoded);
    }

    #[test]
    fn test_trust_auth_blob_without_previous() {
        let blob = TrustAuthInOutBlob {
            count: 1,
            current: vec![nt4owf_entry(10, 0x11)],
            previous: vec![],
        };
        let bytes: Vec<u8> = blob.encode().unwrap();
        let decoded: TrustAuthInOutBlob = bytes.as_slice().decode().unwrap();
        assert!(decoded.previous.is_empty());
        assert_eq!(blob, decoded);
    }

    #[test]
    fn test_trust_auth_blob_keeps_wire_sizes() {
        let mut bytes = vec![
            0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00,
        ];
        // VERSION entry declaring a size of 8
        bytes.extend_from_slice(&[0; 8]);
        bytes.extend_from_slice(&[0x03, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x08, 0x00, 0x00, 0x00]);
        bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);

        let decoded: TrustAuthInOutBlob = bytes.as_slice().decode().unwrap();
        assert_eq!(
            AuthInfoUnion::Version {
                size: 8,
                version: 1
            },
            decoded.current[0].auth_info
        );
    }

    #[test]
    fn test_trust_auth_blob_truncated_header() {
        let input = vec![0x01, 0x00, 0x00, 0x00];
        let result: Result<TrustAuthInOutBlob> = input.as_slice().decode();
        assert!(matches!(result, Err(Error::Parser(_))));
    }

    #[rstest(input, expected,
        case(
            vec![0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00],
            Error::InvalidSubcontext { current: 12, previous: 8 }
        ),
        case(
            vec![
                0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            ],
            Error::UnknownAuthType(9)
        ),
        case(
            vec![
                0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde, 0xde,
            ],
            Error::TrailingData(12)
        ),
        case(
            vec![
                0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
                0xde, 0xde, 0xde, 0xde,
            ],
            Error::TrailingData(4)
        ),
    )]
    fn test_trust_auth_blob_decode_error(input: Vec<u8>, expected: Error) {
        let result: Result<TrustAuthInOutBlob> = input.as_slice().decode();
        assert_eq!(Err(expected), result);
    }

    #[test]
    fn test_auth_info_debug_is_redacted() {
        let info = AuthInfoUnion::Clear {
            password: "secret".encode_utf16().flat_map(u16::to_le_bytes).collect(),
        };
        let debug = format!("{:?}", info);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("115"));
    }
}
