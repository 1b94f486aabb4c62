//! Endpoint classification and candidate sets

use serde::{Deserialize, Serialize};

/// Marker that routes an address to the socket transport
const SOCKET_MARKER: &str = "sock";

/// Transport an endpoint is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    /// Unix domain socket (local proxy)
    Socket,
    /// TCP host, port supplied separately
    Tcp,
}

impl EndpointKind {
    /// Lowercase name, also used as metric label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Socket => "socket",
            Self::Tcp => "tcp",
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide which transport an address goes to
///
/// Any address containing `"sock"` is a socket path, everything else is a TCP
/// host. This never fails; the empty string is `Tcp`.
///
/// The rule is a plain substring match, so a host name such as
/// `socks-proxy.internal` is routed to the socket transport as well. Socket
/// paths must contain `"sock"` to be recognised at all.
pub fn classify(address: &str) -> EndpointKind {
    if address.contains(SOCKET_MARKER) {
        EndpointKind::Socket
    } else {
        EndpointKind::Tcp
    }
}

/// One candidate address with its derived transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    address: String,
    kind: EndpointKind,
}

impl Endpoint {
    /// Classify an address
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let kind = classify(&address);
        Self { address, kind }
    }

    /// Address as given
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Derived transport
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }
}

/// Ordered set of candidate addresses
///
/// Order is fallback priority. Build it with `From` from a single address or
/// any list of addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidates {
    /// One address
    Single(String),
    /// Addresses tried in order
    Many(Vec<String>),
}

impl Candidates {
    /// Classified endpoints in try order
    ///
    /// Empty for an empty list and for an empty single address. Empty entries
    /// inside a non-empty list are kept and will simply fail to connect.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        match self {
            Candidates::Single(address) if address.is_empty() => Vec::new(),
            Candidates::Single(address) => vec![Endpoint::new(address.as_str())],
            Candidates::Many(addresses) => {
                addresses.iter().map(|a| Endpoint::new(a.as_str())).collect()
            }
        }
    }

    /// Whether there is nothing to try
    pub fn is_empty(&self) -> bool {
        match self {
            Candidates::Single(address) => address.is_empty(),
            Candidates::Many(addresses) => addresses.is_empty(),
        }
    }
}

/// Lists render in full, a single address renders as itself
impl std::fmt::Display for Candidates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Candidates::Single(address) => f.write_str(address),
            Candidates::Many(addresses) => write!(f, "{:?}", addresses),
        }
    }
}

impl From<&str> for Candidates {
    fn from(address: &str) -> Self {
        Candidates::Single(address.to_string())
    }
}

impl From<String> for Candidates {
    fn from(address: String) -> Self {
        Candidates::Single(address)
    }
}

impl From<&String> for Candidates {
    fn from(address: &String) -> Self {
        Candidates::Single(address.clone())
    }
}

impl<S: Into<String>> From<Vec<S>> for Candidates {
    fn from(addresses: Vec<S>) -> Self {
        Candidates::Many(addresses.into_iter().map(Into::into).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for Candidates {
    fn from(addresses: &[S]) -> Self {
        Candidates::Many(addresses.iter().map(|a| a.as_ref().to_string()).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Candidates {
    fn from(addresses: [S; N]) -> Self {
        Candidates::Many(addresses.into_iter().map(Into::into).collect())
    }
}
