//! RESP protocol constants

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

/// Largest bulk string accepted from a server (512 MB, the server-side cap)
pub const MAX_BULK_LENGTH: usize = 512 * 1024 * 1024;

/// Largest array accepted from a server
pub const MAX_ARRAY_LENGTH: usize = 1024 * 1024;

/// Reply type prefixes
pub mod prefix {
    /// Simple string (`+OK`)
    pub const SIMPLE_STRING: u8 = b'+';

    /// Error (`-ERR ...`)
    pub const ERROR: u8 = b'-';

    /// Integer (`:1`)
    pub const INTEGER: u8 = b':';

    /// Bulk string (`$3\r\nfoo`)
    pub const BULK_STRING: u8 = b'$';

    /// Array (`*2\r\n...`)
    pub const ARRAY: u8 = b'*';
}

/// Well-known status replies
pub mod status {
    /// Acknowledgement for SELECT and QUIT
    pub const OK: &str = "OK";

    /// Answer to PING without argument
    pub const PONG: &str = "PONG";
}
