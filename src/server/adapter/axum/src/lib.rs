/* src/server/adapter/axum/src/lib.rs */

mod handle;
mod handler;

use std::error::Error;

use folio_server::{FolioError, FolioServer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Re-export folio-server core for convenience
pub use folio_server;
pub use handle::ServerHandle;

type BoxError = Box<dyn Error + Send + Sync>;

/// Extension trait that converts a `FolioServer` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> Result<axum::Router, FolioError>;

  /// Serve on `addr` until Ctrl+C.
  fn serve(self, addr: &str) -> impl Future<Output = Result<(), BoxError>> + Send;

  /// Bind `addr`, then serve on a background task. The listener is accepting
  /// connections by the time this resolves.
  fn spawn(self, addr: &str) -> impl Future<Output = Result<ServerHandle, BoxError>> + Send;
}

impl IntoAxumRouter for FolioServer {
  fn into_axum_router(self) -> Result<axum::Router, FolioError> {
    let parts = self.into_parts()?;
    Ok(handler::build_router(parts))
  }

  async fn serve(self, addr: &str) -> Result<(), BoxError> {
    let router = self.into_axum_router()?;
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    println!("folio server running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router)
      .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
      })
      .await?;
    Ok(())
  }

  async fn spawn(self, addr: &str) -> Result<ServerHandle, BoxError> {
    let router = self.into_axum_router()?;
    spawn_router(router, addr).await
  }
}

/// Bind `addr`, then serve an already-built router on a background task.
pub async fn spawn_router(router: axum::Router, addr: &str) -> Result<ServerHandle, BoxError> {
  let listener = TcpListener::bind(addr).await?;
  let local_addr = listener.local_addr()?;
  let (shutdown, signal) = oneshot::channel::<()>();
  let task = tokio::spawn(async move {
    axum::serve(listener, router)
      .with_graceful_shutdown(async {
        // A dropped sender also counts as a stop request.
        let _ = signal.await;
      })
      .await
  });
  Ok(ServerHandle::new(local_addr, shutdown, task))
}

#[cfg(test)]
mod tests {
  use folio_server::PageData;
  use folio_server::folio_engine::Identity;
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpStream;

  use super::*;

  fn server() -> FolioServer {
    FolioServer::new(PageData::new(Identity { name: "Ada Lovelace".into(), ..Identity::default() }))
  }

  async fn raw_get(addr: std::net::SocketAddr) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
      .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
      .await
      .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
  }

  #[test]
  fn into_axum_router_rejects_invalid_page() {
    let mut page = PageData::new(Identity::default());
    page.identity.name = "   ".into();
    assert!(FolioServer::new(page).into_axum_router().is_err());
  }

  #[tokio::test]
  async fn spawn_serves_until_stopped() {
    let handle = server().spawn("127.0.0.1:0").await.unwrap();
    let addr = handle.local_addr();
    assert_ne!(addr.port(), 0);

    let response = raw_get(addr).await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("<title>Ada Lovelace</title>"));

    handle.stop().await.unwrap();
    assert!(TcpStream::connect(addr).await.is_err());
  }

  #[tokio::test]
  async fn dropping_the_handle_stops_the_server() {
    let handle = server().spawn("127.0.0.1:0").await.unwrap();
    let addr = handle.local_addr();
    drop(handle);
    // The serve task exits on its own once the stop signal fires.
    let mut refused = false;
    for _ in 0..50 {
      if TcpStream::connect(addr).await.is_err() {
        refused = true;
        break;
      }
      tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(refused);
  }
}
