//! TCP connector with bounded retry

use super::connector::Connector;
use super::endpoint::EndpointKind;
use super::params::MAX_TCP_ATTEMPTS;
use crate::{Error, Result};
use std::time::Duration;

/// All attempts against one TCP candidate failed
#[derive(Debug)]
pub struct TcpFailure {
    /// Host that was dialed
    pub host: String,
    /// Port that was dialed
    pub port: u16,
    /// Attempts made
    pub attempts: u32,
    /// Error from the last attempt
    pub error: Error,
}

impl std::fmt::Display for TcpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "connect error {} times to host={}:{}: {}",
            self.attempts, self.host, self.port, self.error
        )
    }
}

/// Connect over TCP, trying up to [`MAX_TCP_ATTEMPTS`] times
///
/// An attempt counts only if the transport connects and, when `database` is
/// above zero, the SELECT succeeds. Failed attempts are retried immediately,
/// without backoff. Worst case this waits `MAX_TCP_ATTEMPTS * timeout` plus
/// the SELECT round trips.
pub async fn connect_tcp<C: Connector>(
    connector: &C,
    host: &str,
    port: u16,
    database: u32,
    timeout: Duration,
) -> std::result::Result<C::Conn, TcpFailure> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        crate::metrics::counters::connect_attempt(EndpointKind::Tcp);

        match attempt(connector, host, port, database, timeout).await {
            Ok(conn) => {
                if attempts > 1 {
                    tracing::debug!(host, port, attempts, "connected after retry");
                }
                return Ok(conn);
            }
            Err(error) if attempts >= MAX_TCP_ATTEMPTS => {
                let failure = TcpFailure {
                    host: host.to_string(),
                    port,
                    attempts,
                    error,
                };
                // Reported by the dispatcher once every candidate is spent
                tracing::debug!(
                    host,
                    port,
                    attempts,
                    error = %failure.error,
                    "tcp candidate failed"
                );
                return Err(failure);
            }
            Err(error) => {
                tracing::debug!(host, port, attempt = attempts, error = %error, "tcp attempt failed");
            }
        }
    }
}

async fn attempt<C: Connector>(
    connector: &C,
    host: &str,
    port: u16,
    database: u32,
    timeout: Duration,
) -> Result<C::Conn> {
    let mut conn = connector.connect_tcp(host, port, timeout).await?;
    if database > 0 {
        connector.select(&mut conn, database).await?;
    }
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::mock::{Call, LogCapture, MockConnector};

    const TIMEOUT: Duration = Duration::from_secs(3);

    #[tokio::test]
    async fn test_tcp_first_attempt() {
        let connector = MockConnector::new().succeed_on("10.0.0.5", 1);

        let conn = connect_tcp(&connector, "10.0.0.5", 6379, 0, TIMEOUT).await.unwrap();
        assert_eq!(conn.address, "10.0.0.5");
        assert_eq!(
            connector.calls(),
            vec![Call::Tcp("10.0.0.5".into(), 6379, TIMEOUT)]
        );
    }

    #[tokio::test]
    async fn test_tcp_stops_at_first_success() {
        let connector = MockConnector::new().succeed_on("10.0.0.5", 2);

        let result = connect_tcp(&connector, "10.0.0.5", 6379, 0, TIMEOUT).await;
        assert!(result.is_ok());
        assert_eq!(connector.attempts("10.0.0.5"), 2);
    }

    #[tokio::test]
    async fn test_tcp_gives_up_after_three_attempts() {
        let connector = MockConnector::new();

        let failure = connect_tcp(&connector, "10.0.0.9", 6387, 2, TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(failure.attempts, MAX_TCP_ATTEMPTS);
        assert_eq!(connector.attempts("10.0.0.9"), 3);
        assert!(connector.selects().is_empty());
        assert!(failure.to_string().starts_with("connect error 3 times to host=10.0.0.9:6387"));
    }

    #[tokio::test]
    async fn test_tcp_select_failure_retries() {
        let connector = MockConnector::new()
            .succeed_on("10.0.0.5", 1)
            .reject_select("10.0.0.5");

        let failure = connect_tcp(&connector, "10.0.0.5", 6379, 1, TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(failure.attempts, 3);
        assert_eq!(connector.selects().len(), 3);
        assert!(matches!(failure.error, Error::SelectRejected { database: 1, .. }));
    }

    #[tokio::test]
    async fn test_tcp_no_select_for_database_zero() {
        let connector = MockConnector::new().succeed_on("10.0.0.5", 1);

        connect_tcp(&connector, "10.0.0.5", 6379, 0, TIMEOUT).await.unwrap();
        assert!(connector.selects().is_empty());
    }

    #[tokio::test]
    async fn test_tcp_select_for_positive_database() {
        let connector = MockConnector::new().succeed_on("10.0.0.5", 1);

        let conn = connect_tcp(&connector, "10.0.0.5", 6379, 5, TIMEOUT).await.unwrap();
        assert_eq!(conn.database, 5);
        assert_eq!(connector.selects(), vec![("10.0.0.5".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_tcp_exhaustion_logged_as_fields() {
        let capture = LogCapture::default();
        let _guard = capture.install();
        let connector = MockConnector::new();

        connect_tcp(&connector, "10.0.0.9", 6387, 0, TIMEOUT)
            .await
            .unwrap_err();

        let output = capture.output();
        let line = output
            .lines()
            .find(|l| l.contains("tcp candidate failed"))
            .expect("exhaustion event");
        assert!(line.contains("10.0.0.9"));
        assert!(line.contains("port=6387"));
        assert!(line.contains("attempts=3"));
        assert!(line.contains("error=io error: 10.0.0.9 refused"));
        assert!(!output.contains("connect error 3 times"));
    }
}
