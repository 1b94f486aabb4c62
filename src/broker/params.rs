//! Connection parameters and broker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default server port
pub const DEFAULT_PORT: u16 = 6379;

/// Default database index (no SELECT issued)
pub const DEFAULT_DATABASE: u32 = 0;

/// Default per-attempt TCP connect timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Attempts made against one TCP candidate before moving on
pub const MAX_TCP_ATTEMPTS: u32 = 3;

/// Category tag of the diagnostic line emitted on total failure
pub const CONNECT_ERROR_CATEGORY: &str = "connectreserror";

/// Parse an integer the lenient way
///
/// Skips leading ASCII whitespace (other Unicode spaces count as garbage),
/// accepts one optional `+`/`-`, then reads the longest run of ASCII digits.
/// Whatever follows is ignored. No digits at all gives 0, so `"6387"`,
/// `" 6387abc"` and `"6387.9"` all give 6387 while `"abc"`, `"\u{a0}6387"`
/// and `""` give 0. Values outside the `i64` range saturate to `i64::MIN` or
/// `i64::MAX`.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    // Negatives accumulate downwards so i64::MIN stays reachable
    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            let digit = i64::from(d - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

/// Per-call connection parameters
///
/// # Defaults
///
/// - `port`: 6379 (ignored for socket endpoints)
/// - `database`: 0, meaning no SELECT is issued
/// - `timeout`: 3 seconds per TCP attempt, zero meaning no timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectParams {
    /// Port for TCP endpoints
    pub port: u16,
    /// Database to SELECT after connecting
    pub database: u32,
    /// Per-attempt TCP connect timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ConnectParams {
    /// Create parameters for a port and database with the default timeout
    pub fn new(port: u16, database: u32) -> Self {
        Self {
            port,
            database,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build parameters from untyped text, e.g. command line or legacy config
    ///
    /// Each value goes through [`coerce_int`]. A result that is negative or
    /// does not fit the field (port above 65535, database above `u32::MAX`)
    /// becomes 0. Timeout is in whole seconds.
    pub fn from_raw(port: &str, database: &str, timeout_secs: &str) -> Self {
        Self {
            port: u16::try_from(coerce_int(port)).unwrap_or(0),
            database: u32::try_from(coerce_int(database)).unwrap_or(0),
            timeout: Duration::from_secs(u64::try_from(coerce_int(timeout_secs)).unwrap_or(0)),
        }
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Broker-wide configuration
///
/// Use `BrokerConfig::builder()` to change defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Per-attempt TCP connect timeout used by `Broker::connect` (default: 3 seconds)
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// Category attached to the diagnostic line (default: "connectreserror")
    pub diagnostic_category: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            diagnostic_category: CONNECT_ERROR_CATEGORY.to_string(),
        }
    }
}

impl BrokerConfig {
    /// Create a builder starting from the defaults
    ///
    /// # Examples
    ///
    /// ```
    /// use cache_broker::BrokerConfig;
    /// use std::time::Duration;
    ///
    /// let config = BrokerConfig::builder()
    ///     .connect_timeout(Duration::from_secs(1))
    ///     .diagnostic_category("cache")
    ///     .build();
    /// assert_eq!(config.connect_timeout, Duration::from_secs(1));
    /// ```
    pub fn builder() -> BrokerConfigBuilder {
        BrokerConfigBuilder {
            config: BrokerConfig::default(),
        }
    }
}

/// Builder for [`BrokerConfig`]
#[derive(Debug, Clone)]
pub struct BrokerConfigBuilder {
    config: BrokerConfig,
}

impl BrokerConfigBuilder {
    /// Set per-attempt TCP connect timeout
    ///
    /// Default: 3 seconds. Zero disables the timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config.connect_timeout = duration;
        self
    }

    /// Set the category tag of the diagnostic line
    ///
    /// Default: "connectreserror"
    pub fn diagnostic_category(mut self, category: impl Into<String>) -> Self {
        self.config.diagnostic_category = category.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> BrokerConfig {
        self.config
    }
}

/// Durations as whole seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
