//! cache-broker: resilient connections to Redis-compatible cache stores
//!
//! Some hosts run a local caching proxy (twemproxy and friends) listening on a
//! unix socket, others don't. The broker takes an ordered list of candidate
//! endpoints and hands back the first one that actually connects, so callers
//! never need to know which topology they are running on.
//!
//! * Candidates containing `"sock"` are dialed over a unix socket, once.
//! * Everything else is treated as a host and dialed over TCP, up to 3 times.
//! * A database index above zero is `SELECT`ed before the handle is returned.
//! * When every candidate fails, one diagnostic line is emitted and an error
//!   describing each failure is returned.
//!
//! ```no_run
//! # async fn example() -> cache_broker::Result<()> {
//! use cache_broker::Broker;
//!
//! let broker = Broker::new();
//! let mut conn = broker
//!     .connect(["/var/run/nutcracker_redis_6387.sock", "172.16.3.6"], 6387, 0)
//!     .await?;
//! conn.ping().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod broker;
pub mod connection;
pub mod error;
pub mod metrics;
pub mod protocol;

pub use broker::{
    classify, Broker, BrokerConfig, BrokerConfigBuilder, Candidates, ConnectParams, Connector,
    DiagnosticSink, Endpoint, EndpointKind, TracingSink, WireConnector,
};
pub use connection::Connection;
pub use error::{CandidateFailure, Error, Result};

/// Connect with the default broker
///
/// Shorthand for `Broker::new().connect(candidates, port, database)`.
pub async fn connect(
    candidates: impl Into<Candidates>,
    port: u16,
    database: u32,
) -> Result<Connection> {
    Broker::new().connect(candidates, port, database).await
}
