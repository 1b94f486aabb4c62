//! Connection management
//!
//! This module handles:
//! * Transport abstraction (TCP vs Unix socket)
//! * Connection lifecycle (connect, database selection, close)
//! * State machine enforcement

mod conn;
mod state;
mod transport;

pub use conn::Connection;
pub use state::ConnectionState;
pub use transport::Transport;

pub(crate) use transport::bounded;
