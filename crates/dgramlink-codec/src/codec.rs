use bytes::{BufMut, BytesMut};

use crate::error::{CodecError, Result};
use crate::format::ElementFormat;

/// A value that was dropped during encoding because it does not fit the
/// declared element format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedValue {
    /// Position of the value in the input sequence.
    pub index: usize,
    /// The out-of-range value.
    pub value: i64,
}

/// Pack `values` into `dst` as fixed-width elements of `format`.
///
/// Encoding is partial: every in-range value is appended in order, every
/// out-of-range value is skipped and returned in the skip list. The result
/// may be empty (all values skipped, or empty input).
pub fn encode(values: &[i64], format: ElementFormat, dst: &mut BytesMut) -> Vec<SkippedValue> {
    let mut skipped = Vec::new();
    dst.reserve(values.len() * format.width());

    for (index, &value) in values.iter().enumerate() {
        if !format.fits(value) {
            skipped.push(SkippedValue { index, value });
            continue;
        }
        match format {
            ElementFormat::U8 => dst.put_u8(value as u8),
            ElementFormat::I8 => dst.put_i8(value as i8),
            ElementFormat::U16Le => dst.put_u16_le(value as u16),
            ElementFormat::U16Be => dst.put_u16(value as u16),
            ElementFormat::I16Le => dst.put_i16_le(value as i16),
            ElementFormat::I16Be => dst.put_i16(value as i16),
            ElementFormat::U32Le => dst.put_u32_le(value as u32),
            ElementFormat::U32Be => dst.put_u32(value as u32),
            ElementFormat::I32Le => dst.put_i32_le(value as i32),
            ElementFormat::I32Be => dst.put_i32(value as i32),
        }
    }

    skipped
}

/// Unpack `raw` as a sequence of fixed-width elements of `format`.
///
/// Fails if the payload length is not a multiple of the element width;
/// otherwise every element is decoded in order and widened to `i64`.
pub fn decode(raw: &[u8], format: ElementFormat) -> Result<Vec<i64>> {
    let width = format.width();
    if raw.len() % width != 0 {
        return Err(CodecError::Misaligned {
            len: raw.len(),
            width,
        });
    }

    let mut values = Vec::with_capacity(raw.len() / width);
    for chunk in raw.chunks_exact(width) {
        let value = match format {
            ElementFormat::U8 => chunk[0] as i64,
            ElementFormat::I8 => chunk[0] as i8 as i64,
            ElementFormat::U16Le => u16::from_le_bytes([chunk[0], chunk[1]]) as i64,
            ElementFormat::U16Be => u16::from_be_bytes([chunk[0], chunk[1]]) as i64,
            ElementFormat::I16Le => i16::from_le_bytes([chunk[0], chunk[1]]) as i64,
            ElementFormat::I16Be => i16::from_be_bytes([chunk[0], chunk[1]]) as i64,
            ElementFormat::U32Le => {
                u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as i64
            }
            ElementFormat::U32Be => {
                u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as i64
            }
            ElementFormat::I32Le => {
                i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as i64
            }
            ElementFormat::I32Be => {
                i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as i64
            }
        };
        values.push(value);
    }

    Ok(values)
}
