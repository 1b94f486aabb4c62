//! Core connection type

use super::state::ConnectionState;
use super::transport::Transport;
use crate::broker::EndpointKind;
use crate::protocol::constants::status;
use crate::protocol::{decode_reply, encode_command, Command, Reply};
use crate::{Error, Result};
use bytes::{Buf, Bytes, BytesMut};
use std::io;

/// Live connection to a cache server
///
/// This is the handle the broker returns. Once handed out it belongs to the
/// caller; the broker keeps no reference to it.
#[derive(Debug)]
pub struct Connection {
    transport: Transport,
    state: ConnectionState,
    read_buf: BytesMut,
    database: u32,
}

impl Connection {
    /// Create connection from transport
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            state: ConnectionState::Connected,
            read_buf: BytesMut::with_capacity(4096),
            database: 0,
        }
    }

    /// Get current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Database index currently selected
    pub fn database(&self) -> u32 {
        self.database
    }

    /// Kind of transport underneath
    pub fn transport_kind(&self) -> EndpointKind {
        self.transport.kind()
    }

    /// Mark a freshly connected transport as usable on database 0
    pub fn mark_ready(&mut self) -> Result<()> {
        if self.state == ConnectionState::Ready {
            return Ok(());
        }
        self.state.transition(ConnectionState::Ready)
    }

    /// Switch to another logical database
    ///
    /// Anything other than `+OK` is reported as [`Error::SelectRejected`] and
    /// leaves the previously selected database in place.
    pub async fn select(&mut self, database: u32) -> Result<()> {
        let previous = self.state;
        self.state.transition(ConnectionState::Selecting)?;

        self.send_command(&Command::Select(database)).await?;
        let reply = self.receive_reply().await?;

        if reply.is_ok() {
            self.state.transition(ConnectionState::Ready)?;
            self.database = database;
            tracing::debug!(database, "database selected");
            return Ok(());
        }

        // Reply was read in full, the stream is still in sync
        self.state = previous;
        Err(Error::SelectRejected {
            database,
            reason: reply.to_string(),
        })
    }

    /// Check that the server answers
    pub async fn ping(&mut self) -> Result<()> {
        match self.command_reply(&Command::Ping).await? {
            Reply::Simple(s) if s == status::PONG => Ok(()),
            Reply::Error(e) => Err(Error::Server(e)),
            other => Err(Error::Protocol(format!("unexpected PING reply: {}", other))),
        }
    }

    /// Send an arbitrary command and return the server's reply
    ///
    /// Error replies come back as [`Reply::Error`] rather than `Err`, only
    /// transport and protocol problems fail the call.
    pub async fn command<I, A>(&mut self, args: I) -> Result<Reply>
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        let args: Vec<Bytes> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(Error::Protocol("empty command".into()));
        }
        self.command_reply(&Command::Raw(args)).await
    }

    async fn command_reply(&mut self, cmd: &Command) -> Result<Reply> {
        if self.state != ConnectionState::Ready {
            return Err(Error::InvalidState {
                expected: ConnectionState::Ready.to_string(),
                actual: self.state.to_string(),
            });
        }
        self.send_command(cmd).await?;
        self.receive_reply().await
    }

    /// Send a command
    async fn send_command(&mut self, cmd: &Command) -> Result<()> {
        let buf = encode_command(cmd);
        self.transport.write_all(&buf).await?;
        self.transport.flush().await?;
        Ok(())
    }

    /// Receive one reply
    async fn receive_reply(&mut self) -> Result<Reply> {
        loop {
            match decode_reply(&self.read_buf) {
                Ok((reply, consumed)) => {
                    self.read_buf.advance(consumed);
                    return Ok(reply);
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {}
                Err(e) => return Err(Error::Protocol(e.to_string())),
            }

            // Need more data
            let n = self.transport.read_buf(&mut self.read_buf).await?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        let was_ready = self.state == ConnectionState::Ready;
        self.state.transition(ConnectionState::Closed)?;
        if was_ready {
            let _ = self.send_command(&Command::Quit).await;
        }
        self.transport.shutdown().await?;
        Ok(())
    }
}
