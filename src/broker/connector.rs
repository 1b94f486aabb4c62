//! Connection primitives used by the broker

use crate::connection::{bounded, Connection, Transport};
use crate::Result;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Transport-level primitives the broker is built on
///
/// The broker only decides *which* endpoint to dial and *how often*; the
/// actual dialing and database selection go through this trait.
/// [`WireConnector`] is the real implementation.
pub trait Connector: Send + Sync {
    /// Connection handle produced on success
    type Conn: Send;

    /// Open a connection over a unix domain socket
    fn connect_unix(&self, path: &Path) -> impl Future<Output = Result<Self::Conn>> + Send;

    /// Open a TCP connection, failing once `timeout` elapses (zero: no timeout)
    fn connect_tcp(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> impl Future<Output = Result<Self::Conn>> + Send;

    /// Select a logical database on an open connection
    fn select(
        &self,
        conn: &mut Self::Conn,
        database: u32,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Connector speaking RESP over tokio sockets
#[derive(Debug, Clone)]
pub struct WireConnector {
    command_timeout: Duration,
}

impl WireConnector {
    /// Create a connector with a 3 second SELECT round-trip bound
    pub fn new() -> Self {
        Self {
            command_timeout: Duration::from_secs(3),
        }
    }

    /// Bound the SELECT round trip (zero: wait forever)
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }
}

impl Default for WireConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for WireConnector {
    type Conn = Connection;

    async fn connect_unix(&self, path: &Path) -> Result<Connection> {
        let transport = Transport::connect_unix(path).await?;
        let mut conn = Connection::new(transport);
        conn.mark_ready()?;
        Ok(conn)
    }

    async fn connect_tcp(&self, host: &str, port: u16, timeout: Duration) -> Result<Connection> {
        let transport = Transport::connect_tcp_timeout(host, port, timeout).await?;
        let mut conn = Connection::new(transport);
        conn.mark_ready()?;
        Ok(conn)
    }

    async fn select(&self, conn: &mut Connection, database: u32) -> Result<()> {
        bounded(self.command_timeout, conn.select(database)).await
    }
}
