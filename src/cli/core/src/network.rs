/* src/cli/core/src/network.rs */

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

/// `host:port` for binding, with IPv6 literals bracketed (`[::1]:3000`).
pub(crate) fn listen_addr(host: &str, port: u16) -> String {
  let host = host.trim();
  if host.contains(':') && !host.starts_with('[') {
    format!("[{host}]:{port}")
  } else {
    format!("{host}:{port}")
  }
}

/// Poll `addr` until it accepts TCP connections, or bail after `timeout`.
pub(crate) async fn wait_for_addr(addr: SocketAddr, timeout: Duration) -> Result<()> {
  let deadline = Instant::now() + timeout;
  loop {
    if tokio::net::TcpStream::connect(addr).await.is_ok() {
      return Ok(());
    }
    if Instant::now() >= deadline {
      bail!("timed out after {}ms waiting for {addr} to accept connections", timeout.as_millis());
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
  }
}
