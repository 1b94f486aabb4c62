#![no_main]

use bytes::BytesMut;
use cache_broker::protocol::decode::decode_reply;
use libfuzzer_sys::arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use std::io;

#[derive(Debug)]
struct StreamingInput {
    data: Vec<u8>,
    split_points: Vec<u8>,
}

impl<'a> Arbitrary<'a> for StreamingInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> libfuzzer_sys::arbitrary::Result<Self> {
        let data: Vec<u8> = u.arbitrary()?;
        let split_points: Vec<u8> = u.arbitrary()?;
        Ok(Self { data, split_points })
    }
}

fuzz_target!(|input: StreamingInput| {
    if input.data.is_empty() {
        return;
    }

    let mut splits: Vec<usize> = input
        .split_points
        .iter()
        .map(|&b| (b as usize) % (input.data.len() + 1))
        .collect();
    splits.push(0);
    splits.push(input.data.len());
    splits.sort_unstable();
    splits.dedup();

    // Feed data in chunks the way socket reads would deliver it
    let mut buf = BytesMut::new();
    for window in splits.windows(2) {
        buf.extend_from_slice(&input.data[window[0]..window[1]]);

        loop {
            if buf.is_empty() {
                break;
            }
            match decode_reply(&buf) {
                Ok((_, consumed)) => {
                    let _ = buf.split_to(consumed);
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(_) => return,
            }
        }
    }
});
