#![no_main]

use bytes::BytesMut;
use cache_broker::protocol::decode::decode_reply;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut buf = BytesMut::from(data);

    // Several replies may arrive back to back in one read
    loop {
        if buf.is_empty() {
            break;
        }
        match decode_reply(&buf) {
            Ok((_, consumed)) => {
                assert!(consumed > 0 && consumed <= buf.len());
                let _ = buf.split_to(consumed);
            }
            Err(_) => break,
        }
    }
});
