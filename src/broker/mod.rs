//! Connection broker
//!
//! This module handles:
//! * Endpoint classification (socket path vs TCP host)
//! * Single-attempt socket connects and retried TCP connects
//! * Database selection before a connection is handed out
//! * Ordered fallback across candidates and the failure report

mod connector;
mod diagnostic;
mod dispatch;
mod endpoint;
mod params;
mod socket;
mod tcp;

#[cfg(test)]
pub(crate) mod mock;

pub use connector::{Connector, WireConnector};
pub use diagnostic::{DiagnosticSink, TracingSink};
pub use dispatch::Broker;
pub use endpoint::{classify, Candidates, Endpoint, EndpointKind};
pub use params::{
    coerce_int, BrokerConfig, BrokerConfigBuilder, ConnectParams, CONNECT_ERROR_CATEGORY,
    DEFAULT_DATABASE, DEFAULT_PORT, DEFAULT_TIMEOUT, MAX_TCP_ATTEMPTS,
};
pub use socket::connect_socket;
pub use tcp::{connect_tcp, TcpFailure};
