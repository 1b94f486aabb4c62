//! Protocol message encoding

use super::constants::{prefix, CRLF};
use super::message::Command;
use bytes::{BufMut, BytesMut};

/// Encode a command as a RESP array of bulk strings
pub fn encode_command(cmd: &Command) -> BytesMut {
    let args = cmd.args();
    let mut buf = BytesMut::with_capacity(16 + args.iter().map(|a| a.len() + 16).sum::<usize>());

    put_header(&mut buf, prefix::ARRAY, args.len());
    for arg in &args {
        put_header(&mut buf, prefix::BULK_STRING, arg.len());
        buf.put_slice(arg);
        buf.put_slice(CRLF);
    }

    buf
}

fn put_header(buf: &mut BytesMut, tag: u8, len: usize) {
    buf.put_u8(tag);
    buf.put_slice(len.to_string().as_bytes());
    buf.put_slice(CRLF);
}
