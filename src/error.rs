//! Error types

use crate::broker::EndpointKind;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Main error type for cache-broker operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Connection attempt did not complete in time
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Peer closed the connection
    #[error("connection closed")]
    ConnectionClosed,

    /// Protocol violation
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Server answered with a RESP error reply
    #[error("server error: {0}")]
    Server(String),

    /// SELECT did not return OK
    #[error("select of database {database} rejected: {reason}")]
    SelectRejected {
        /// Requested database index
        database: u32,
        /// Server reply or local cause
        reason: String,
    },

    /// Invalid connection state for the requested operation
    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState {
        /// Expected state
        expected: String,
        /// Actual state
        actual: String,
    },

    /// Candidate set was empty (empty list or empty address)
    #[error("no candidate endpoints given")]
    NoCandidates,

    /// Every candidate failed
    #[error("all {} candidate endpoints failed (port {port})", .failures.len())]
    CandidatesExhausted {
        /// Port used for TCP candidates
        port: u16,
        /// Final failure of each candidate, in the order they were tried
        failures: Vec<CandidateFailure>,
    },
}

impl Error {
    /// Whether this error ended a whole `connect` call rather than one attempt
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, Error::NoCandidates | Error::CandidatesExhausted { .. })
    }

    /// Whether this error came from the transport rather than the server
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Timeout(_) | Error::ConnectionClosed
        )
    }
}

/// Why a single candidate was given up on
#[derive(Debug)]
pub struct CandidateFailure {
    /// Candidate address as given by the caller
    pub address: String,
    /// Transport it was routed to
    pub kind: EndpointKind,
    /// Number of connection attempts made
    pub attempts: u32,
    /// Error from the last attempt
    pub error: Error,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} attempt{}): {}",
            self.address,
            self.kind,
            self.attempts,
            if self.attempts == 1 { "" } else { "s" },
            self.error
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
