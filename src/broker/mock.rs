//! Scripted connector and recording sink for broker tests

use super::connector::Connector;
use super::diagnostic::DiagnosticSink;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Primitive invoked on the connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Unix(String),
    Tcp(String, u16, Duration),
    Select(String, u32),
}

/// Handle handed out by [`MockConnector`]
#[derive(Debug)]
pub(crate) struct MockConn {
    pub address: String,
    pub database: u32,
}

/// Connector whose outcomes are scripted per address
///
/// Addresses without a script never connect.
#[derive(Debug, Default)]
pub(crate) struct MockConnector {
    succeed_from: HashMap<String, usize>,
    rejects_select: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts before `attempt` (1-based) fail, later ones succeed
    pub fn succeed_on(mut self, address: &str, attempt: usize) -> Self {
        self.succeed_from.insert(address.to_string(), attempt);
        self
    }

    /// SELECT on connections to `address` returns an error reply
    pub fn reject_select(mut self, address: &str) -> Self {
        self.rejects_select.insert(address.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Connect attempts made against `address`
    pub fn attempts(&self, address: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Unix(a) | Call::Tcp(a, _, _) if a == address))
            .count()
    }

    pub fn selects(&self) -> Vec<(String, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Select(a, db) => Some((a, db)),
                _ => None,
            })
            .collect()
    }

    fn dial(&self, call: Call, address: &str) -> Result<MockConn> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        let attempt = calls
            .iter()
            .filter(|c| matches!(c, Call::Unix(a) | Call::Tcp(a, _, _) if a == address))
            .count();

        match self.succeed_from.get(address) {
            Some(&from) if attempt >= from => Ok(MockConn {
                address: address.to_string(),
                database: 0,
            }),
            _ => Err(Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("{} refused", address),
            ))),
        }
    }
}

impl Connector for MockConnector {
    type Conn = MockConn;

    async fn connect_unix(&self, path: &Path) -> Result<MockConn> {
        let address = path.to_string_lossy().into_owned();
        self.dial(Call::Unix(address.clone()), &address)
    }

    async fn connect_tcp(&self, host: &str, port: u16, timeout: Duration) -> Result<MockConn> {
        self.dial(Call::Tcp(host.to_string(), port, timeout), host)
    }

    async fn select(&self, conn: &mut MockConn, database: u32) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Select(conn.address.clone(), database));

        if self.rejects_select.contains(&conn.address) {
            return Err(Error::SelectRejected {
                database,
                reason: "ERR DB index is out of range".into(),
            });
        }
        conn.database = database;
        Ok(())
    }
}

/// Sink that keeps every emitted line
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSink {
    lines: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSink {
    /// Emitted `(line, category)` pairs
    pub fn lines(&self) -> Vec<(String, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, line: &str, category: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((line.to_string(), category.to_string()));
    }
}

/// Buffer collecting formatted tracing output
#[derive(Debug, Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a debug-level plain-text subscriber for the current thread
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
