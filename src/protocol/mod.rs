//! RESP wire protocol
//!
//! Only the subset the broker needs to bring a connection up (SELECT, PING,
//! QUIT) plus raw commands for callers that want to go further.

pub mod constants;
pub mod decode;
pub mod encode;
pub mod message;

pub use decode::decode_reply;
pub use encode::encode_command;
pub use message::{Command, Reply};
