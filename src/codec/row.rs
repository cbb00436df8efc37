//! # Record Row Encoding
//!
//! Byte encoding for `Record<Value>`, built on the `asdict` /
//! construct-from-mapping pair: each field is written with its name, and
//! decoding rebuilds the name -> value mapping and hands it to
//! `RecordType::from_mapping`. A row therefore decodes into any record type
//! whose fields cover the stored names, regardless of slot order.
//!
//! ## Encoding Format
//!
//! ```text
//! Row := [field_count: u16] [Field]*
//! Field := [name_len: u16] [name: utf8] [discriminant: u8] [Data]
//!
//! Discriminants:
//!   0x01 = NULL (no data)
//!   0x02 = FALSE (no data)
//!   0x03 = TRUE (no data)
//!   0x10 = NEG_INFINITY (no data, deserializes to Float)
//!   0x12 = NEG_INT (8 bytes big-endian i64)
//!   0x13 = NEG_FLOAT (8 bytes f64 bits)
//!   0x14 = ZERO (no data, deserializes to Int(0))
//!   0x15 = POS_FLOAT (8 bytes f64 bits)
//!   0x16 = POS_INT (8 bytes big-endian i64)
//!   0x17 = FLOAT_ZERO (8 bytes f64 bits, keeps the sign of zero)
//!   0x18 = POS_INFINITY (no data, deserializes to Float)
//!   0x19 = NAN (no data, deserializes to Float)
//!   0x20 = TEXT ([len: u32] [utf8_bytes])
//!   0x21 = BLOB ([len: u32] [bytes])
//! ```
//!
//! All integers are big-endian. The same record always produces the same
//! bytes. Truncated or malformed input is reported as an error, never a
//! panic.

use eyre::{bail, ensure, Result, WrapErr};
use smallvec::SmallVec;

use crate::records::{Record, RecordType};
use crate::types::Value;

mod discriminant {
    pub const NULL: u8 = 0x01;
    pub const FALSE: u8 = 0x02;
    pub const TRUE: u8 = 0x03;

    pub const NEG_INFINITY: u8 = 0x10;

    pub const NEG_INT: u8 = 0x12;
    pub const NEG_FLOAT: u8 = 0x13;
    pub const ZERO: u8 = 0x14;
    pub const POS_FLOAT: u8 = 0x15;
    pub const POS_INT: u8 = 0x16;
    pub const FLOAT_ZERO: u8 = 0x17;

    pub const POS_INFINITY: u8 = 0x18;
    pub const NAN: u8 = 0x19;

    pub const TEXT: u8 = 0x20;
    pub const BLOB: u8 = 0x21;
}

pub struct RowCodec;

impl RowCodec {
    pub fn encode(record: &Record<Value>) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(Self::encoded_size(record));
        Self::encode_into(record, &mut buf)?;
        Ok(buf)
    }

    /// Appends the encoding of `record` to `buf`.
    ///
    /// Fails if a length does not fit its prefix; `buf` is then left as it
    /// was before the call.
    pub fn encode_into(record: &Record<Value>, buf: &mut Vec<u8>) -> Result<()> {
        let start = buf.len();
        if let Err(err) = Self::write_row(record, buf) {
            buf.truncate(start);
            return Err(err);
        }

        tracing::trace!(
            type_name = record.type_name(),
            bytes = buf.len() - start,
            "encoded record"
        );
        Ok(())
    }

    fn write_row(record: &Record<Value>, buf: &mut Vec<u8>) -> Result<()> {
        let count = u16::try_from(record.len()).wrap_err("too many fields for row header")?;
        buf.extend_from_slice(&count.to_be_bytes());

        for (name, value) in record.items() {
            let name_len = u16::try_from(name.len())
                .wrap_err_with(|| format!("field name of {} bytes is too long", name.len()))?;
            buf.extend_from_slice(&name_len.to_be_bytes());
            buf.extend_from_slice(name.as_bytes());
            Self::encode_value_into(value, buf)
                .wrap_err_with(|| format!("failed to encode field '{}'", name))?;
        }
        Ok(())
    }

    /// Exact number of bytes `encode_into` appends for `record`.
    pub fn encoded_size(record: &Record<Value>) -> usize {
        2 + record
            .items()
            .map(|(name, value)| 2 + name.len() + Self::value_size(value))
            .sum::<usize>()
    }

    fn value_size(value: &Value) -> usize {
        match value {
            Value::Null | Value::Bool(_) => 1,
            Value::Int(0) => 1,
            Value::Int(_) => 9,
            Value::Float(f) if f.is_nan() || f.is_infinite() => 1,
            Value::Float(_) => 9,
            Value::Text(s) => 5 + s.len(),
            Value::Blob(b) => 5 + b.len(),
        }
    }

    fn encode_value_into(value: &Value, buf: &mut Vec<u8>) -> Result<()> {
        match value {
            Value::Null => {
                buf.push(discriminant::NULL);
            }
            Value::Bool(b) => {
                buf.push(if *b { discriminant::TRUE } else { discriminant::FALSE });
            }
            Value::Int(i) => {
                if *i < 0 {
                    buf.push(discriminant::NEG_INT);
                    buf.extend_from_slice(&i.to_be_bytes());
                } else if *i == 0 {
                    buf.push(discriminant::ZERO);
                } else {
                    buf.push(discriminant::POS_INT);
                    buf.extend_from_slice(&i.to_be_bytes());
                }
            }
            Value::Float(f) => {
                if f.is_nan() {
                    buf.push(discriminant::NAN);
                } else if *f == f64::NEG_INFINITY {
                    buf.push(discriminant::NEG_INFINITY);
                } else if *f == f64::INFINITY {
                    buf.push(discriminant::POS_INFINITY);
                } else if *f == 0.0 {
                    buf.push(discriminant::FLOAT_ZERO);
                    buf.extend_from_slice(&f.to_bits().to_be_bytes());
                } else if *f < 0.0 {
                    buf.push(discriminant::NEG_FLOAT);
                    buf.extend_from_slice(&f.to_bits().to_be_bytes());
                } else {
                    buf.push(discriminant::POS_FLOAT);
                    buf.extend_from_slice(&f.to_bits().to_be_bytes());
                }
            }
            Value::Text(s) => {
                buf.push(discriminant::TEXT);
                let bytes = s.as_bytes();
                buf.extend_from_slice(&payload_len(bytes)?.to_be_bytes());
                buf.extend_from_slice(bytes);
            }
            Value::Blob(b) => {
                buf.push(discriminant::BLOB);
                buf.extend_from_slice(&payload_len(b)?.to_be_bytes());
                buf.extend_from_slice(b);
            }
        }
        Ok(())
    }

    /// Decodes one row starting at `*offset` into an instance of `ty`.
    ///
    /// With `strict` set, a stored field that `ty` does not declare is an
    /// error; otherwise it is skipped. On success `*offset` points past the
    /// row.
    pub fn decode(
        ty: &RecordType<Value>,
        data: &[u8],
        offset: &mut usize,
        strict: bool,
    ) -> Result<Record<Value>> {
        let start = *offset;
        let count = read_u16(data, offset).wrap_err("truncated row: missing field count")? as usize;

        let mut fields: SmallVec<[(String, Value); 8]> = SmallVec::with_capacity(count);
        for _ in 0..count {
            let name_len = read_u16(data, offset).wrap_err("truncated field name length")? as usize;
            let name = std::str::from_utf8(take(data, offset, name_len)?)
                .wrap_err("field name is not valid utf-8")?
                .to_string();
            let value = Self::decode_value(data, offset)
                .wrap_err_with(|| format!("failed to decode field '{}'", name))?;
            fields.push((name, value));
        }

        let record = ty.from_mapping(fields, strict)?;
        tracing::trace!(
            type_name = ty.type_name(),
            bytes = *offset - start,
            "decoded record"
        );
        Ok(record)
    }

    /// Decodes a row that must be the whole of `data`.
    pub fn decode_exact(ty: &RecordType<Value>, data: &[u8]) -> Result<Record<Value>> {
        let mut offset = 0;
        let record = Self::decode(ty, data, &mut offset, true)?;
        ensure!(
            offset == data.len(),
            "{} trailing bytes after record",
            data.len() - offset
        );
        Ok(record)
    }

    fn decode_value(data: &[u8], offset: &mut usize) -> Result<Value> {
        let disc = take(data, offset, 1).wrap_err("truncated row: missing discriminant")?[0];

        match disc {
            discriminant::NULL => Ok(Value::Null),
            discriminant::FALSE => Ok(Value::Bool(false)),
            discriminant::TRUE => Ok(Value::Bool(true)),

            discriminant::ZERO => Ok(Value::Int(0)),

            discriminant::NEG_INT | discriminant::POS_INT => {
                Ok(Value::Int(i64::from_be_bytes(read_array(data, offset)?)))
            }

            discriminant::NAN => Ok(Value::Float(f64::NAN)),
            discriminant::NEG_INFINITY => Ok(Value::Float(f64::NEG_INFINITY)),
            discriminant::POS_INFINITY => Ok(Value::Float(f64::INFINITY)),

            discriminant::NEG_FLOAT | discriminant::POS_FLOAT | discriminant::FLOAT_ZERO => {
                let bits = u64::from_be_bytes(read_array(data, offset)?);
                Ok(Value::Float(f64::from_bits(bits)))
            }

            discriminant::TEXT => {
                let len = u32::from_be_bytes(read_array(data, offset)?) as usize;
                let bytes = take(data, offset, len).wrap_err("truncated text data")?;
                let s = std::str::from_utf8(bytes)?;
                Ok(Value::Text(s.to_string()))
            }

            discriminant::BLOB => {
                let len = u32::from_be_bytes(read_array(data, offset)?) as usize;
                let bytes = take(data, offset, len).wrap_err("truncated blob data")?;
                Ok(Value::Blob(bytes.to_vec()))
            }

            other => bail!("unknown value discriminant 0x{:02x}", other),
        }
    }
}

fn payload_len(bytes: &[u8]) -> Result<u32> {
    u32::try_from(bytes.len())
        .wrap_err_with(|| format!("payload of {} bytes exceeds the u32 length prefix", bytes.len()))
}

fn take<'a>(data: &'a [u8], offset: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| eyre::eyre!("length {} overflows offset {}", len, offset))?;
    ensure!(
        end <= data.len(),
        "need {} bytes at offset {}, only {} available",
        len,
        offset,
        data.len().saturating_sub(*offset)
    );
    let out = &data[*offset..end];
    *offset = end;
    Ok(out)
}

fn read_array<const N: usize>(data: &[u8], offset: &mut usize) -> Result<[u8; N]> {
    let bytes = take(data, offset, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok(out)
}

fn read_u16(data: &[u8], offset: &mut usize) -> Result<u16> {
    Ok(u16::from_be_bytes(read_array(data, offset)?))
}
