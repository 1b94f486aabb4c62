//! Protocol message types

use bytes::Bytes;

/// Command sent to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the connection to a logical database
    Select(u32),

    /// Liveness check
    Ping,

    /// Ask the server to close the connection
    Quit,

    /// Arbitrary command given as raw arguments
    Raw(Vec<Bytes>),
}

impl Command {
    /// Arguments of the command, name first
    pub fn args(&self) -> Vec<Bytes> {
        match self {
            Command::Select(db) => vec![
                Bytes::from_static(b"SELECT"),
                Bytes::from(db.to_string()),
            ],
            Command::Ping => vec![Bytes::from_static(b"PING")],
            Command::Quit => vec![Bytes::from_static(b"QUIT")],
            Command::Raw(args) => args.clone(),
        }
    }
}

/// Reply received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Simple string
    Simple(String),

    /// Error reply
    Error(String),

    /// Integer reply
    Integer(i64),

    /// Bulk string (`None` for the null bulk string)
    Bulk(Option<Bytes>),

    /// Array (`None` for the null array)
    Array(Option<Vec<Reply>>),
}

impl Reply {
    /// Whether this is the `+OK` status reply
    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Simple(s) if s == super::constants::status::OK)
    }

    /// Whether this is an error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Simple(s) => write!(f, "{}", s),
            Reply::Error(e) => write!(f, "{}", e),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Bulk(Some(b)) => write!(f, "\"{}\"", String::from_utf8_lossy(b)),
            Reply::Bulk(None) | Reply::Array(None) => write!(f, "(nil)"),
            Reply::Array(Some(items)) => write!(f, "(array of {})", items.len()),
        }
    }
}
