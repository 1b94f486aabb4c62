//! Candidate dispatcher

use super::connector::{Connector, WireConnector};
use super::diagnostic::{self, DiagnosticSink, TracingSink};
use super::endpoint::{Candidates, EndpointKind};
use super::params::{BrokerConfig, ConnectParams};
use super::socket::connect_socket;
use super::tcp::connect_tcp;
use crate::error::CandidateFailure;
use crate::{Error, Result};
use std::time::Instant;
use tracing::Instrument;

/// Connection broker
///
/// Holds only immutable configuration, so one broker can serve any number of
/// concurrent `connect` calls; each call keeps its own state.
#[derive(Debug, Clone)]
pub struct Broker<C = WireConnector, S = TracingSink> {
    connector: C,
    sink: S,
    config: BrokerConfig,
}

impl Broker {
    /// Broker with the wire connector, tracing sink and default configuration
    pub fn new() -> Self {
        Self::with_config(BrokerConfig::default())
    }

    /// Broker with the wire connector and tracing sink
    pub fn with_config(config: BrokerConfig) -> Self {
        Self::with_parts(WireConnector::new(), TracingSink, config)
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector, S: DiagnosticSink> Broker<C, S> {
    /// Assemble a broker from its collaborators
    pub fn with_parts(connector: C, sink: S, config: BrokerConfig) -> Self {
        Self {
            connector,
            sink,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Connect to the first candidate that accepts
    ///
    /// Candidates are tried in order. Socket paths get one attempt, TCP hosts
    /// get up to three, each bounded by the configured connect timeout. When
    /// `database` is above zero the returned connection already has it
    /// selected. The first success is returned and later candidates are never
    /// touched.
    ///
    /// If nothing connects, one line naming the candidates and port is sent to
    /// the diagnostic sink and [`Error::NoCandidates`] or
    /// [`Error::CandidatesExhausted`] is returned.
    ///
    /// Worst case, a list of `n` unreachable TCP hosts waits
    /// `n * 3 * connect_timeout` (plus SELECT round trips) before failing.
    pub async fn connect(
        &self,
        candidates: impl Into<Candidates>,
        port: u16,
        database: u32,
    ) -> Result<C::Conn> {
        let params = ConnectParams::new(port, database).timeout(self.config.connect_timeout);
        self.connect_with(candidates, &params).await
    }

    /// Same as [`Broker::connect`] with explicit parameters, timeout included
    pub async fn connect_with(
        &self,
        candidates: impl Into<Candidates>,
        params: &ConnectParams,
    ) -> Result<C::Conn> {
        let candidates = candidates.into();
        let span = tracing::info_span!(
            "connect",
            candidates = %candidates,
            port = params.port,
            database = params.database
        );

        async move {
            let endpoints = candidates.endpoints();
            let mut failures = Vec::with_capacity(endpoints.len());

            for endpoint in endpoints {
                let kind = endpoint.kind();
                let started = Instant::now();

                let outcome = match kind {
                    EndpointKind::Socket => {
                        connect_socket(&self.connector, endpoint.address(), params.database)
                            .await
                            .map_err(|error| (1, error))
                    }
                    EndpointKind::Tcp => connect_tcp(
                        &self.connector,
                        endpoint.address(),
                        params.port,
                        params.database,
                        params.timeout,
                    )
                    .await
                    .map_err(|failure| (failure.attempts, failure.error)),
                };

                crate::metrics::histograms::connect_duration(kind, started.elapsed());

                match outcome {
                    Ok(conn) => {
                        crate::metrics::counters::connect_succeeded(kind);
                        tracing::info!(address = endpoint.address(), transport = %kind, "connected");
                        return Ok(conn);
                    }
                    Err((attempts, error)) => {
                        crate::metrics::counters::candidate_failed(kind);
                        tracing::debug!(
                            address = endpoint.address(),
                            transport = %kind,
                            attempts,
                            error = %error,
                            "candidate failed"
                        );
                        failures.push(CandidateFailure {
                            address: endpoint.address().to_string(),
                            kind,
                            attempts,
                            error,
                        });
                    }
                }
            }

            self.report_exhaustion(&candidates, params.port);

            if failures.is_empty() {
                Err(Error::NoCandidates)
            } else {
                Err(Error::CandidatesExhausted {
                    port: params.port,
                    failures,
                })
            }
        }
        .instrument(span)
        .await
    }

    fn report_exhaustion(&self, candidates: &Candidates, port: u16) {
        crate::metrics::counters::candidates_exhausted();
        let line = diagnostic::format_line(&diagnostic::timestamp(), candidates, port);
        self.sink.emit(&line, &self.config.diagnostic_category);
    }
}
