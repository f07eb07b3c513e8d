use std::fmt;

use serde::{Deserialize, Serialize};
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_ndr::auth::{NT4OWF_SIZE, VERSION_SIZE};
use trustinfo_ndr::{AuthInfoUnion, AuthType, AuthenticationInformation};
use trustinfo_security::NtTime;

use crate::error::{Error, Result};

const NT4OWF_LEN: usize = NT4OWF_SIZE as usize;
const VERSION_LEN: usize = VERSION_SIZE as usize;

/// Authentication material of one generation, already validated for its
/// type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthData {
    None,
    Nt4Owf([u8; 16]),
    Clear(String),
    Version(u32),
}

impl AuthData {
    pub fn auth_type(&self) -> AuthType {
        match self {
            AuthData::None => AuthType::None,
            AuthData::Nt4Owf(_) => AuthType::Nt4Owf,
            AuthData::Clear(_) => AuthType::Clear,
            AuthData::Version(_) => AuthType::Version,
        }
    }
}

impl fmt::Debug for AuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthData::None => write!(f, "None"),
            AuthData::Nt4Owf(_) => write!(f, "Nt4Owf(<redacted>)"),
            AuthData::Clear(_) => write!(f, "Clear(<redacted>)"),
            AuthData::Version(version) => f.debug_tuple("Version").field(version).finish(),
        }
    }
}

/// In-memory form of one `AuthenticationInformation` entry, as handed to
/// the LSA trusted domain APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustDomainInfoBuffer {
    pub last_update_time: NtTime,
    pub data: AuthData,
}

impl TrustDomainInfoBuffer {
    pub fn new(last_update_time: NtTime, data: AuthData) -> Self {
        TrustDomainInfoBuffer {
            last_update_time,
            data,
        }
    }

    /// Build a buffer from the raw `{AuthType, data}` pair of the RPC layer.
    ///
    /// NONE takes no data, NT4OWF exactly 16 bytes, VERSION exactly 4
    /// (little-endian) and CLEAR UTF-8 text.
    pub fn from_raw(last_update_time: NtTime, auth_type: u32, data: &[u8]) -> Result<Self> {
        let auth_type =
            AuthType::try_from(auth_type).map_err(|_| Error::UnknownAuthType(auth_type))?;
        let data = match auth_type {
            AuthType::None => {
                check_size(auth_type, 0, data.len())?;
                AuthData::None
            }
            AuthType::Nt4Owf => {
                let hash = <[u8; 16]>::try_from(data).map_err(|_| Error::InvalidSize {
                    auth_type,
                    expected: NT4OWF_LEN,
                    actual: data.len(),
                })?;
                AuthData::Nt4Owf(hash)
            }
            AuthType::Clear => {
                let text = std::str::from_utf8(data).map_err(|_| Error::InvalidClearText)?;
                AuthData::Clear(text.to_string())
            }
            AuthType::Version => {
                let raw = <[u8; 4]>::try_from(data).map_err(|_| Error::InvalidSize {
                    auth_type,
                    expected: VERSION_LEN,
                    actual: data.len(),
                })?;
                AuthData::Version(u32::from_le_bytes(raw))
            }
        };
        Ok(TrustDomainInfoBuffer::new(last_update_time, data))
    }

    pub fn auth_type(&self) -> AuthType {
        self.data.auth_type()
    }

    /// The payload as the RPC layer carries it.
    pub fn raw_data(&self) -> Vec<u8> {
        match &self.data {
            AuthData::None => Vec::new(),
            AuthData::Nt4Owf(hash) => hash.to_vec(),
            AuthData::Clear(password) => password.as_bytes().to_vec(),
            AuthData::Version(version) => version.to_le_bytes().to_vec(),
        }
    }
}

fn check_size(auth_type: AuthType, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidSize {
            auth_type,
            expected,
            actual,
        });
    }
    Ok(())
}

fn utf16le_to_string(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::InvalidClearPassword);
    }
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|_| Error::InvalidClearPassword)
}

fn string_to_utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

impl DecodableFrom<AuthenticationInformation> for TrustDomainInfoBuffer {}

impl Decoder<AuthenticationInformation, TrustDomainInfoBuffer> for AuthenticationInformation {
    type Error = Error;

    fn decode(&self) -> Result<TrustDomainInfoBuffer> {
        let data = match &self.auth_info {
            AuthInfoUnion::None { .. } => AuthData::None,
            AuthInfoUnion::Nt4Owf { size, hash } => {
                check_size(AuthType::Nt4Owf, NT4OWF_LEN, *size as usize)?;
                AuthData::Nt4Owf(*hash)
            }
            AuthInfoUnion::Clear { password } => AuthData::Clear(utf16le_to_string(password)?),
            AuthInfoUnion::Version { size, version } => {
                check_size(AuthType::Version, VERSION_LEN, *size as usize)?;
                AuthData::Version(*version)
            }
        };
        Ok(TrustDomainInfoBuffer::new(self.last_update_time, data))
    }
}

impl EncodableTo<TrustDomainInfoBuffer> for AuthenticationInformation {}

impl Encoder<TrustDomainInfoBuffer, AuthenticationInformation> for TrustDomainInfoBuffer {
    type Error = Error;

    fn encode(&self) -> Result<AuthenticationInformation> {
        let auth_info = match &self.data {
            AuthData::None => AuthInfoUnion::None { size: 0 },
            AuthData::Nt4Owf(hash) => AuthInfoUnion::Nt4Owf {
                size: NT4OWF_SIZE,
                hash: *hash,
            },
            AuthData::Clear(password) => AuthInfoUnion::Clear {
                password: string_to_utf16le(password),
            },
            AuthData::Version(version) => AuthInfoUnion::Version {
                size: VERSION_SIZE,
                version: *version,
            },
        };
        Ok(AuthenticationInformation {
            last_update_time: self.last_update_time,
            auth_info,
        })
    }
}
