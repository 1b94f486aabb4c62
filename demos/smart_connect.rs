//! Connect through the broker from the command line
//!
//! ```text
//! cargo run --example smart_connect -- <candidates> [port] [database]
//! cargo run --example smart_connect -- /var/run/nutcracker_redis_6387.sock,172.16.3.6 6387 0
//! ```
//!
//! Candidates are comma separated. Port and database are parsed leniently
//! (`"6387abc"` is 6387, garbage is 0). Set `RUST_LOG=cache_broker=debug` to
//! watch each attempt.

use cache_broker::{Broker, Candidates, ConnectParams};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let raw_candidates = args.next().unwrap_or_default();
    let port = args.next().unwrap_or_else(|| "6379".to_string());
    let database = args.next().unwrap_or_else(|| "0".to_string());

    let candidates = if raw_candidates.contains(',') {
        Candidates::from(raw_candidates.split(',').collect::<Vec<_>>())
    } else {
        Candidates::from(raw_candidates)
    };
    let params = ConnectParams::from_raw(&port, &database, "3");

    let broker = Broker::new();
    match broker.connect_with(candidates, &params).await {
        Ok(mut conn) => {
            println!(
                "connected via {} (database {})",
                conn.transport_kind(),
                conn.database()
            );
            match conn.ping().await {
                Ok(()) => println!("PING ok"),
                Err(e) => println!("PING failed: {}", e),
            }
            let _ = conn.close().await;
        }
        Err(e) => {
            eprintln!("connect failed: {}", e);
            if let cache_broker::Error::CandidatesExhausted { failures, .. } = &e {
                for failure in failures {
                    eprintln!("  {}", failure);
                }
            }
            std::process::exit(1);
        }
    }
}
