//! Compact reversible text encoding for paths
//!
//! Coordinates are quantized to 5 decimal digits and stored as deltas from the previous
//! point, latitude then longitude. Each delta is zig-zag mapped to an unsigned value and
//! written as 5-bit groups, least significant first, offset into the printable range
//! `'?'..='~'`. Every group except the last carries the continuation bit `0x20`.

use crate::{LatLng, Path};

/// Text produced by [`encode_polyline`]
pub type EncodedPolyline = String;

/// Quantization factor (5 decimal digits)
const PRECISION: f64 = 1e5;

/// Offset added to every 5-bit group to land in printable ASCII
const CHAR_OFFSET: u8 = 63;

/// Bits carried by each character
const GROUP_BITS: u32 = 5;
const GROUP_MASK: u64 = 0x1f;
const CONTINUATION_BIT: u64 = 0x20;

/// Largest character the encoder can produce (`63 + 0x3f`)
const MAX_CHAR: u8 = CHAR_OFFSET + 0x3f;

/// Errors produced while decoding an encoded polyline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("input ends inside a value starting at byte {offset}")]
    Truncated { offset: usize },

    #[error("invalid character {character:?} at byte {offset}")]
    InvalidCharacter { character: char, offset: usize },

    #[error("latitude without a matching longitude")]
    UnpairedCoordinate,

    #[error("value starting at byte {offset} does not fit in 64 bits")]
    Overflow { offset: usize },
}

/// Encode a path into its compact text form
///
/// Each coordinate is rounded to the nearest `1e-5` degree (halves away from zero) before
/// taking deltas, so rounding error never accumulates along the path.
pub fn encode_polyline(path: &[LatLng]) -> EncodedPolyline {
    #[cfg(feature = "profiling")]
    profiling::scope!("polyline::encode");

    let mut encoded = String::with_capacity(path.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in path {
        let lat = quantize(point.lat);
        let lng = quantize(point.lng);
        encode_value(lat.wrapping_sub(prev_lat), &mut encoded);
        encode_value(lng.wrapping_sub(prev_lng), &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

/// Decode text produced by [`encode_polyline`]
///
/// Either the whole input decodes or an error is returned; a partially decoded path is never
/// handed back.
pub fn decode_polyline(text: &str) -> Result<Path, DecodeError> {
    #[cfg(feature = "profiling")]
    profiling::scope!("polyline::decode");

    let bytes = text.as_bytes();
    let mut path = Vec::with_capacity(bytes.len() / 8);
    let mut offset = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while offset < bytes.len() {
        let (lat_delta, next) = decode_value(text, offset)?;
        if next >= bytes.len() {
            return Err(DecodeError::UnpairedCoordinate);
        }
        let (lng_delta, next) = decode_value(text, next)?;
        offset = next;

        lat = lat.wrapping_add(lat_delta);
        lng = lng.wrapping_add(lng_delta);
        path.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(path)
}

#[inline]
fn quantize(coordinate: f64) -> i64 {
    (coordinate * PRECISION).round() as i64
}

/// Zig-zag map a signed value so small magnitudes of either sign stay small
#[inline]
fn zigzag(value: i64) -> u64 {
    ((value as u64) << 1) ^ ((value >> 63) as u64)
}

#[inline]
fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn encode_value(value: i64, out: &mut String) {
    let mut remaining = zigzag(value);
    while remaining >= CONTINUATION_BIT {
        let group = (remaining & GROUP_MASK) | CONTINUATION_BIT;
        out.push(char::from(group as u8 + CHAR_OFFSET));
        remaining >>= GROUP_BITS;
    }
    out.push(char::from(remaining as u8 + CHAR_OFFSET));
}

/// Read one value starting at `start`, returning it and the offset just past it
fn decode_value(text: &str, start: usize) -> Result<(i64, usize), DecodeError> {
    let bytes = text.as_bytes();
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut offset = start;

    loop {
        let Some(&byte) = bytes.get(offset) else {
            return Err(DecodeError::Truncated { offset: start });
        };
        if !(CHAR_OFFSET..=MAX_CHAR).contains(&byte) {
            let character = text[offset..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(DecodeError::InvalidCharacter { character, offset });
        }

        let group = u64::from(byte - CHAR_OFFSET);
        let bits = group & GROUP_MASK;
        if shift >= u64::BITS || (shift > 0 && bits >> (u64::BITS - shift) != 0) {
            return Err(DecodeError::Overflow { offset: start });
        }
        result |= bits << shift;
        shift += GROUP_BITS;
        offset += 1;

        if group & CONTINUATION_BIT == 0 {
            return Ok((unzigzag(result), offset));
        }
    }
}
