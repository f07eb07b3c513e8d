//! Little-endian NDR primitives (no alignment unless stated).

use nom::{IResult, Parser};
use trustinfo_security::{DomSid, SID_MAX_SUB_AUTHS};

use crate::error::{Error, Result};

/// Remaining input and a value, or a codec error.
pub(crate) type Parsed<'a, T> = Result<(&'a [u8], T)>;

pub(crate) fn le_u8(input: &[u8]) -> IResult<&[u8], u8> {
    nom::number::complete::le_u8(input)
}

pub(crate) fn le_u32(input: &[u8]) -> IResult<&[u8], u32> {
    nom::number::complete::le_u32(input)
}

pub(crate) fn le_u64(input: &[u8]) -> IResult<&[u8], u64> {
    nom::number::complete::le_u64(input)
}

pub(crate) fn take(input: &[u8], length: usize) -> IResult<&[u8], &[u8]> {
    nom::bytes::complete::take(length).parse(input)
}

/// Padding needed to bring `offset` up to a multiple of `align`.
pub(crate) fn align_padding(offset: usize, align: usize) -> usize {
    (align - offset % align) % align
}

pub(crate) fn size_u32(length: usize) -> Result<u32> {
    u32::try_from(length).map_err(|_| Error::SizeOverflow(length))
}

pub(crate) fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn push_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// `u32 size` followed by `size` bytes.
pub(crate) fn parse_sized_bytes(input: &[u8]) -> Parsed<'_, &[u8]> {
    let (input, size) = le_u32(input)?;
    let (input, data) = take(input, size as usize)?;
    Ok((input, data))
}

pub(crate) fn push_sized_bytes(out: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    push_u32(out, size_u32(data.len())?);
    out.extend_from_slice(data);
    Ok(())
}

/// Counted UTF-8 string without terminator.
pub(crate) fn parse_string(input: &[u8]) -> Parsed<'_, String> {
    let (input, data) = parse_sized_bytes(input)?;
    let s = std::str::from_utf8(data).map_err(|_| Error::InvalidUtf8)?;
    Ok((input, s.to_string()))
}

pub(crate) fn push_string(out: &mut Vec<u8>, s: &str) -> Result<()> {
    push_sized_bytes(out, s.as_bytes())
}

pub(crate) fn parse_sid(input: &[u8]) -> Parsed<'_, DomSid> {
    let (input, revision) = le_u8(input)?;
    let (input, num_auths) = le_u8(input)?;
    if usize::from(num_auths) > SID_MAX_SUB_AUTHS {
        return Err(Error::SidTooManySubAuths(num_auths));
    }
    let (mut input, authority) = take(input, 6)?;
    let mut id_auth = [0u8; 6];
    id_auth.copy_from_slice(authority);

    let mut sub_auths = Vec::with_capacity(usize::from(num_auths));
    for _ in 0..num_auths {
        let (rest, sub) = le_u32(input)?;
        sub_auths.push(sub);
        input = rest;
    }

    Ok((input, DomSid::from_raw(revision, id_auth, sub_auths)?))
}

pub(crate) fn push_sid(out: &mut Vec<u8>, sid: &DomSid) {
    out.push(sid.revision());
    // DomSid never holds more than 15 sub authorities.
    out.push(sid.sub_auths().len() as u8);
    out.extend_from_slice(&sid.identifier_authority());
    for sub in sid.sub_auths() {
        push_u32(out, *sub);
    }
}

/// Packed size of a SID where the empty sentinel takes no space.
pub(crate) fn sid0_size(sid: &DomSid) -> usize {
    if sid.is_empty() {
        0
    } else {
        8 + 4 * sid.sub_auths().len()
    }
}
