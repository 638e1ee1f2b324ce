/* src/cli/core/src/snapshot/fetch.rs */

use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::ui;

/// Retry budget for the single page fetch.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
  /// Total attempts, including the first.
  pub attempts: u32,
  /// Delay before the first retry; doubled after each failure.
  pub backoff: Duration,
  /// Per-request timeout.
  pub timeout: Duration,
}

/// GET `url` and return the body.
///
/// Only connection failures are retried, since they mean the listener is not
/// up yet. Timeouts and non-2xx answers abort immediately.
pub(super) async fn fetch_page(url: &str, policy: &FetchPolicy) -> Result<String> {
  let client = reqwest::Client::builder()
    .timeout(policy.timeout)
    // No idle keep-alive, so graceful shutdown is not held open by the pool.
    .pool_max_idle_per_host(0)
    .build()
    .context("failed to build http client")?;

  let mut delay = policy.backoff;
  let mut attempt = 1;
  loop {
    match client.get(url).send().await {
      Ok(response) => {
        let status = response.status();
        if !status.is_success() {
          bail!("GET {url} returned {status}");
        }
        return response.text().await.with_context(|| format!("failed to read body of {url}"));
      }
      Err(e) if e.is_connect() && attempt < policy.attempts => {
        ui::detail(&format!(
          "{}connection refused{}, retry {attempt}/{} in {}ms",
          ui::YELLOW,
          ui::RESET,
          policy.attempts - 1,
          delay.as_millis()
        ));
        tokio::time::sleep(delay).await;
        delay = delay.saturating_mul(2);
        attempt += 1;
      }
      Err(e) => {
        return Err(e).with_context(|| format!("GET {url} failed after {attempt} attempt(s)"));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpListener;

  use super::*;

  fn policy(attempts: u32) -> FetchPolicy {
    FetchPolicy {
      attempts,
      backoff: Duration::from_millis(10),
      timeout: Duration::from_secs(5),
    }
  }

  async fn answer_once(listener: TcpListener, response: &'static str) {
    let (mut stream, _) = listener.accept().await.unwrap();
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
      let n = stream.read(&mut buf).await.unwrap();
      assert!(n > 0, "client closed before sending a request");
      request.extend_from_slice(&buf[..n]);
    }
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.unwrap();
  }

  #[tokio::test]
  async fn returns_body_on_success() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let server = tokio::spawn(answer_once(
      listener,
      "HTTP/1.1 200 OK\r\ncontent-length: 5\r\nconnection: close\r\n\r\nhello",
    ));
    assert_eq!(fetch_page(&url, &policy(1)).await.unwrap(), "hello");
    server.await.unwrap();
  }

  #[tokio::test]
  async fn non_success_status_aborts() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let server = tokio::spawn(answer_once(
      listener,
      "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    ));
    let err = fetch_page(&url, &policy(3)).await.unwrap_err();
    assert!(err.to_string().contains("500"));
    server.await.unwrap();
  }

  #[tokio::test]
  async fn refused_connections_exhaust_retries() {
    let addr = {
      let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
      listener.local_addr().unwrap()
    };
    let err = fetch_page(&format!("http://{addr}/"), &policy(3)).await.unwrap_err();
    assert!(err.to_string().contains("after 3 attempt(s)"));
  }

  #[tokio::test]
  async fn late_listener_is_reached_by_retry() {
    let addr = {
      let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
      listener.local_addr().unwrap()
    };
    let server = tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(30)).await;
      let listener = TcpListener::bind(addr).await.unwrap();
      answer_once(listener, "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok")
        .await;
    });
    let body = fetch_page(&format!("http://{addr}/"), &policy(8)).await.unwrap();
    assert_eq!(body, "ok");
    server.await.unwrap();
  }
}
