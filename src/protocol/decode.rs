//! Protocol message decoding

use super::constants::{prefix, MAX_ARRAY_LENGTH, MAX_BULK_LENGTH};
use super::message::Reply;
use bytes::Bytes;
use std::io;

/// Maximum nesting of arrays inside a reply
const MAX_DEPTH: usize = 32;

/// Decode one reply from the front of `data`
///
/// # Returns
/// `Ok((reply, consumed))` - Reply and number of bytes consumed. The caller
/// must advance its buffer by `consumed`.
/// `Err(e)` with `UnexpectedEof` - more bytes are needed
/// `Err(e)` with `InvalidData` - the stream is corrupt
///
/// Length headers are checked against [`MAX_BULK_LENGTH`] and
/// [`MAX_ARRAY_LENGTH`] before anything is allocated.
pub fn decode_reply(data: &[u8]) -> io::Result<(Reply, usize)> {
    decode_at(data, 0, 0)
}

fn decode_at(data: &[u8], start: usize, depth: usize) -> io::Result<(Reply, usize)> {
    if depth > MAX_DEPTH {
        return Err(invalid("reply nested too deeply"));
    }

    let (line, body_start) = read_line(data, start)?;
    let (&tag, rest) = line
        .split_first()
        .ok_or_else(|| invalid("empty reply line"))?;

    match tag {
        prefix::SIMPLE_STRING => Ok((Reply::Simple(utf8(rest)?), body_start)),
        prefix::ERROR => Ok((Reply::Error(utf8(rest)?), body_start)),
        prefix::INTEGER => Ok((Reply::Integer(parse_int(rest)?), body_start)),
        prefix::BULK_STRING => {
            let len = parse_int(rest)?;
            if len < 0 {
                return Ok((Reply::Bulk(None), body_start));
            }
            let len = len as usize;
            if len > MAX_BULK_LENGTH {
                return Err(invalid(format!(
                    "bulk length {} exceeds maximum allowed {}",
                    len, MAX_BULK_LENGTH
                )));
            }
            let end = body_start + len;
            if data.len() < end + 2 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "incomplete bulk string",
                ));
            }
            if &data[end..end + 2] != b"\r\n" {
                return Err(invalid("bulk string not terminated by CRLF"));
            }
            let value = Bytes::copy_from_slice(&data[body_start..end]);
            Ok((Reply::Bulk(Some(value)), end + 2))
        }
        prefix::ARRAY => {
            let len = parse_int(rest)?;
            if len < 0 {
                return Ok((Reply::Array(None), body_start));
            }
            let len = len as usize;
            if len > MAX_ARRAY_LENGTH {
                return Err(invalid(format!(
                    "array length {} exceeds maximum allowed {}",
                    len, MAX_ARRAY_LENGTH
                )));
            }
            let mut items = Vec::with_capacity(len.min(64));
            let mut offset = body_start;
            for _ in 0..len {
                let (item, next) = decode_at(data, offset, depth + 1)?;
                items.push(item);
                offset = next;
            }
            Ok((Reply::Array(Some(items)), offset))
        }
        other => Err(invalid(format!("unknown reply prefix: 0x{:02X}", other))),
    }
}

/// Returns the line starting at `start` (without CRLF) and the offset after it
fn read_line(data: &[u8], start: usize) -> io::Result<(&[u8], usize)> {
    let window = data.get(start..).unwrap_or_default();
    match window.windows(2).position(|w| w == b"\r\n") {
        Some(pos) => Ok((&window[..pos], start + pos + 2)),
        None => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "incomplete reply line",
        )),
    }
}

fn parse_int(raw: &[u8]) -> io::Result<i64> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| invalid(format!("invalid integer: {:?}", String::from_utf8_lossy(raw))))
}

fn utf8(raw: &[u8]) -> io::Result<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| invalid(e.to_string()))
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}
