use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::{
    aio::ConnectionManager, AsyncCommands, Client, ConnectionAddr, ConnectionInfo,
    RedisConnectionInfo,
};
use tracing::debug;

use super::KvBackend;

/// Redis-backed `KvBackend`.
///
/// Holds a single long-lived `ConnectionManager` that is shared by every
/// request; each call cheaply clones the handle, so no request ever owns the
/// connection exclusively. The manager reconnects on its own after transient
/// failures.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Connect to the store at `addr` (`host:port`) and verify the connection
    /// with a `PING` round trip.
    ///
    /// Called once at startup; an unreachable store is a fatal error and the
    /// process must not start serving traffic.
    pub async fn connect(addr: &str, password: Option<String>) -> Result<Self> {
        let (host, port) = parse_addr(addr)?;
        debug!(host = %host, port = port, "Opening store connection");

        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host, port),
            // Database 0 with optional auth; everything else is the default.
            redis: RedisConnectionInfo {
                password,
                ..Default::default()
            },
        };

        let client = Client::open(info).context("invalid store connection settings")?;
        let mut conn = ConnectionManager::new(client)
            .await
            .with_context(|| format!("failed to connect to the sensor data store at {addr}"))?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .with_context(|| format!("sensor data store at {addr} did not answer PING"))?;
        debug!(response = %pong, "Store ping OK");

        Ok(Self { conn })
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.conn.clone();
        // Plain SET, no expiration: readings persist until overwritten.
        let _: () = conn
            .set(key, value)
            .await
            .with_context(|| format!("store SET for key {key} failed"))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn
            .get(key)
            .await
            .with_context(|| format!("store GET for key {key} failed"))?;
        Ok(value)
    }
}

/// Split a `host:port` store address into its parts.
fn parse_addr(addr: &str) -> Result<(String, u16)> {
    let (host, port) = addr
        .rsplit_once(':')
        .with_context(|| format!("store address must be 'host:port', got: {addr:?}"))?;

    if host.is_empty() {
        anyhow::bail!("store address is missing a host: {addr:?}");
    }

    let port = port
        .parse::<u16>()
        .with_context(|| format!("invalid port in store address {addr:?}"))?;

    Ok((host.to_owned(), port))
}
