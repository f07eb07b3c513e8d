//! Incoming and outgoing trust auth info and its blob form.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trustinfo::decoder::{DecodableFrom, Decoder};
use trustinfo::encoder::{EncodableTo, Encoder};
use trustinfo_ndr::{AuthenticationInformation, TrustAuthInOutBlob};

use crate::buffer::TrustDomainInfoBuffer;
use crate::error::{Error, Result};

/// Current and previous auth info of one trust direction.
///
/// `previous` is `None` when the blob carries no previous generation;
/// otherwise it has as many entries as `current`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthInfoGenerations {
    pub current: Vec<TrustDomainInfoBuffer>,
    pub previous: Option<Vec<TrustDomainInfoBuffer>>,
}

impl AuthInfoGenerations {
    pub fn new(
        current: Vec<TrustDomainInfoBuffer>,
        previous: Option<Vec<TrustDomainInfoBuffer>>,
    ) -> Self {
        AuthInfoGenerations { current, previous }
    }

    pub fn count(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Structured blob for these generations, not yet packed.
    pub fn to_wire(&self) -> Result<TrustAuthInOutBlob> {
        let count = u32::try_from(self.count())
            .map_err(|_| trustinfo_ndr::Error::SizeOverflow(self.count()))?;

        let current = encode_array(&self.current)?;
        let previous = match &self.previous {
            Some(previous) => {
                check_count("previous", count, previous.len())?;
                encode_array(previous)?
            }
            None => Vec::new(),
        };

        Ok(TrustAuthInOutBlob {
            count,
            current,
            previous,
        })
    }

    fn from_wire(blob: &TrustAuthInOutBlob) -> Result<Self> {
        check_count("current", blob.count, blob.current.len())?;
        let current = decode_array(&blob.current)?;
        let previous = if blob.previous.is_empty() {
            None
        } else {
            check_count("previous", blob.count, blob.previous.len())?;
            Some(decode_array(&blob.previous)?)
        };
        Ok(AuthInfoGenerations { current, previous })
    }
}

fn check_count(generation: &'static str, count: u32, len: usize) -> Result<()> {
    if count as usize != len {
        return Err(Error::CountMismatch {
            generation,
            count,
            len,
        });
    }
    Ok(())
}

fn decode_array(entries: &[AuthenticationInformation]) -> Result<Vec<TrustDomainInfoBuffer>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let buffer: Result<TrustDomainInfoBuffer> = entry.decode();
            buffer.inspect_err(|e| {
                debug!(index, auth_type = %entry.auth_info.auth_type(), error = %e, "failed to decode authentication information");
            })
        })
        .collect()
}

fn encode_array(buffers: &[TrustDomainInfoBuffer]) -> Result<Vec<AuthenticationInformation>> {
    buffers
        .iter()
        .enumerate()
        .map(|(index, buffer)| {
            let entry: Result<AuthenticationInformation> = buffer.encode();
            entry.inspect_err(|e| {
                debug!(index, auth_type = %buffer.auth_type(), error = %e, "failed to encode trust domain info buffer");
            })
        })
        .collect()
}

impl DecodableFrom<[u8]> for AuthInfoGenerations {}

impl Decoder<[u8], AuthInfoGenerations> for [u8] {
    type Error = Error;

    /// A zero length blob is a direction without auth info.
    fn decode(&self) -> Result<AuthInfoGenerations> {
        if self.is_empty() {
            return Ok(AuthInfoGenerations::default());
        }
        let blob: TrustAuthInOutBlob = self.decode()?;
        AuthInfoGenerations::from_wire(&blob)
    }
}

impl EncodableTo<AuthInfoGenerations> for Vec<u8> {}

impl Encoder<AuthInfoGenerations, Vec<u8>> for AuthInfoGenerations {
    type Error = Error;

    /// A direction without auth info is a zero length blob.
    fn encode(&self) -> Result<Vec<u8>> {
        let blob = self.to_wire()?;
        if blob.count == 0 {
            return Ok(Vec::new());
        }
        Ok(blob.encode()?)
    }
}

/// Auth info of a trusted domain in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthInfo {
    pub incoming: AuthInfoGenerations,
    pub outgoing: AuthInfoGenerations,
}

impl AuthInfo {
    pub fn new(incoming: AuthInfoGenerations, outgoing: AuthInfoGenerations) -> Self {
        AuthInfo { incoming, outgoing }
    }
}

fn decode_direction(direction: &'static str, blob: &[u8]) -> Result<AuthInfoGenerations> {
    let generations: Result<AuthInfoGenerations> = blob.decode();
    generations.inspect_err(|e| {
        debug!(direction, error = %e, "failed to decode trust auth blob");
    })
}

fn encode_direction(direction: &'static str, generations: &AuthInfoGenerations) -> Result<Vec<u8>> {
    let blob: Result<Vec<u8>> = generations.encode();
    blob.inspect_err(|e| {
        debug!(direction, error = %e, "failed to encode trust auth blob");
    })
}

/// Decode the incoming and outgoing `trustAuthInOutBlob`s of a trusted
/// domain.
pub fn decode_auth_info(incoming: &[u8], outgoing: &[u8]) -> Result<AuthInfo> {
    Ok(AuthInfo::new(
        decode_direction("incoming", incoming)?,
        decode_direction("outgoing", outgoing)?,
    ))
}

/// Encode auth info into its incoming and outgoing `trustAuthInOutBlob`s.
pub fn encode_auth_info(auth_info: &AuthInfo) -> Result<(Vec<u8>, Vec<u8>)> {
    Ok((
        encode_direction("incoming", &auth_info.incoming)?,
        encode_direction("outgoing", &auth_info.outgoing)?,
    ))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use trustinfo::ErrorKind;
    use trustinfo_ndr::AuthInfoUnion;
    use trustinfo_security::NtTime;

    use super::*;
    use crate::buffer::AuthData;

    fn buffer(time: u64, data: AuthData) -> TrustDomainInfoBuffer {
        TrustDomainInfoBuffer::new(NtTime::new(time), data)
    }

    fn full_auth_info() -> AuthInfo {
        AuthInfo::new(
            AuthInfoGenerations::new(
                vec![
                    buffer(10, AuthData::Clear("n\u{e9}wPassw0rd".to_string())),
                    buffer(11, AuthData::Version(2)),
                ],
                Some(vec![
                    buffer(5, AuthData::Nt4Owf([0x5a; 16])),
                    buffer(6, AuthData::None),
                ]),
            ),
            AuthInfoGenerations::new(vec![buffer(20, AuthData::Clear("out".to_string()))], None),
        )
    }

    fn wire_blob(count: u32, current: Vec<AuthInfoUnion>, previous: Vec<AuthInfoUnion>) -> Vec<u8> {
        let entry = |auth_info| AuthenticationInformation {
            last_update_time: NtTime::new(1),
            auth_info,
        };
        TrustAuthInOutBlob {
            count,
            current: current.into_iter().map(entry).collect(),
            previous: previous.into_iter().map(entry).collect(),
        }
        .encode()
        .unwrap()
    }

    #[test]
    fn test_auth_info_roundtrip() {
        let auth_info = full_auth_info();
        let (incoming, outgoing) = encode_auth_info(&auth_info).unwrap();
        assert!(!incoming.is_empty());
        assert!(!outgoing.is_empty());

        let decoded = decode_auth_info(&incoming, &outgoing).unwrap();
        assert_eq!(auth_info, decoded);
    }

    #[test]
    fn test_empty_blobs_decode_to_empty_auth_info() {
        let auth_info = decode_auth_info(&[], &[]).unwrap();
        assert_eq!(0, auth_info.incoming.count());
        assert_eq!(0, auth_info.outgoing.count());
        assert_eq!(None, auth_info.incoming.previous);
        assert_eq!(None, auth_info.outgoing.previous);
    }

    #[test]
    fn test_empty_side_encodes_to_zero_length_blob() {
        let auth_info = AuthInfo::new(
            AuthInfoGenerations::default(),
            AuthInfoGenerations::new(vec![buffer(1, AuthData::Version(1))], None),
        );
        let (incoming, outgoing) = encode_auth_info(&auth_info).unwrap();
        assert!(incoming.is_empty());
        assert_eq!(&[1, 0, 0, 0], &outgoing[0..4]);

        let decoded = decode_auth_info(&incoming, &outgoing).unwrap();
        assert_eq!(auth_info, decoded);
    }

    #[test]
    fn test_missing_previous_decodes_to_none() {
        let blob = wire_blob(1, vec![AuthInfoUnion::Version { size: 4, version: 1 }], vec![]);
        let generations: AuthInfoGenerations = blob.as_slice().decode().unwrap();
        assert_eq!(1, generations.count());
        assert_eq!(None, generations.previous);
    }

    #[rstest(blob, expected,
        // NT4OWF with a 15 byte size field
        case(
            wire_blob(1, vec![AuthInfoUnion::Nt4Owf { size: 15, hash: [0; 16] }], vec![]),
            Error::InvalidSize { auth_type: trustinfo_ndr::AuthType::Nt4Owf, expected: 16, actual: 15 }
        ),
        // VERSION with an 8 byte size field, in the previous generation
        case(
            wire_blob(
                1,
                vec![AuthInfoUnion::None { size: 0 }],
                vec![AuthInfoUnion::Version { size: 8, version: 1 }],
            ),
            Error::InvalidSize { auth_type: trustinfo_ndr::AuthType::Version, expected: 4, actual: 8 }
        ),
        case(
            wire_blob(1, vec![AuthInfoUnion::Clear { password: vec![0x00, 0xdc] }], vec![]),
            Error::InvalidClearPassword
        ),
        case(
            wire_blob(2, vec![AuthInfoUnion::None { size: 0 }], vec![]),
            Error::CountMismatch { generation: "current", count: 2, len: 1 }
        ),
        case(
            wire_blob(
                1,
                vec![AuthInfoUnion::None { size: 0 }],
                vec![AuthInfoUnion::None { size: 0 }, AuthInfoUnion::None { size: 0 }],
            ),
            Error::CountMismatch { generation: "previous", count: 1, len: 2 }
        ),
    )]
    fn test_decode_invalid_entries(blob: Vec<u8>, expected: Error) {
        let incoming = decode_auth_info(&blob, &[]).unwrap_err();
        let outgoing = decode_auth_info(&[], &blob).unwrap_err();
        assert_eq!(expected, incoming);
        assert_eq!(expected, outgoing);
        assert_eq!(ErrorKind::InvalidParameter, incoming.kind());
    }

    #[test]
    fn test_decode_unknown_auth_type() {
        // count 1, one entry with auth type 7
        let mut blob = vec![
            0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x1c, 0x00, 0x00, 0x00,
        ];
        blob.extend_from_slice(&[0; 8]);
        blob.extend_from_slice(&[0x07, 0x00, 0x00, 0x00]);
        blob.extend_from_slice(&[0; 4]);

        let err = decode_auth_info(&blob, &[]).unwrap_err();
        assert_eq!(
            Error::Codec(trustinfo_ndr::Error::UnknownAuthType(7)),
            err
        );
        assert_eq!(ErrorKind::InvalidParameter, err.kind());
    }

    #[rstest(blob,
        case(vec![0x01]),
        case(vec![0x01, 0x00, 0x00, 0x00, 0x0c, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00]),
    )]
    fn test_decode_malformed_blob(blob: Vec<u8>) {
        let err = decode_auth_info(&blob, &[]).unwrap_err();
        assert!(matches!(err, Error::Codec(_)));
        assert_eq!(ErrorKind::InvalidParameter, err.kind());
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let auth_info = AuthInfo::new(
            AuthInfoGenerations::new(vec![buffer(1, AuthData::Version(1))], None),
            AuthInfoGenerations::default(),
        );
        let (mut incoming, outgoing) = encode_auth_info(&auth_info).unwrap();
        incoming.extend_from_slice(&[0xde; 12]);

        let err = decode_auth_info(&incoming, &outgoing).unwrap_err();
        assert_eq!(Error::Codec(trustinfo_ndr::Error::TrailingData(12)), err);
        assert_eq!(ErrorKind::InvalidParameter, err.kind());
    }

    #[test]
    fn test_encode_previous_count_mismatch() {
        let auth_info = AuthInfo::new(
            AuthInfoGenerations::new(
                vec![buffer(1, AuthData::None), buffer(2, AuthData::None)],
                Some(vec![buffer(1, AuthData::None)]),
            ),
            AuthInfoGenerations::default(),
        );
        assert_eq!(
            Err(Error::CountMismatch {
                generation: "previous",
                count: 2,
                len: 1
            }),
            encode_auth_info(&auth_info)
        );
    }

    #[test]
    fn test_to_wire() {
        let generations = full_auth_info().incoming;
        let blob = generations.to_wire().unwrap();
        assert_eq!(2, blob.count);
        assert_eq!(
            AuthInfoUnion::Version { size: 4, version: 2 },
            blob.current[1].auth_info
        );
        assert_eq!(
            AuthInfoUnion::Nt4Owf {
                size: 16,
                hash: [0x5a; 16]
            },
            blob.previous[0].auth_info
        );
    }

    #[test]
    fn test_auth_info_serde() {
        let auth_info = full_auth_info();
        let json = serde_json::to_string(&auth_info).unwrap();
        let back: AuthInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(auth_info, back);
    }
}
