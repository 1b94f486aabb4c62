//! Unix socket connector

use super::connector::Connector;
use super::endpoint::EndpointKind;
use crate::Result;
use std::path::Path;

/// Connect to a local socket, exactly once
///
/// Selects `database` when it is above zero. Both steps must succeed; there
/// is no retry at this layer, a failure here is final for the candidate.
pub async fn connect_socket<C: Connector>(
    connector: &C,
    path: &str,
    database: u32,
) -> Result<C::Conn> {
    crate::metrics::counters::connect_attempt(EndpointKind::Socket);

    let mut conn = connector.connect_unix(Path::new(path)).await?;
    if database > 0 {
        connector.select(&mut conn, database).await?;
    }
    Ok(conn)
}
