/* src/server/adapter/axum/src/handle.rs */

use std::io;
use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running server started with `IntoAxumRouter::spawn` or [`spawn_router`](crate::spawn_router).
///
/// Dropping the handle requests shutdown without waiting for it; call
/// [`ServerHandle::stop`] to wait until the socket is released.
pub struct ServerHandle {
  local_addr: SocketAddr,
  shutdown: Option<oneshot::Sender<()>>,
  task: JoinHandle<io::Result<()>>,
}

impl ServerHandle {
  pub(crate) fn new(
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
  ) -> Self {
    Self { local_addr, shutdown: Some(shutdown), task }
  }

  pub fn local_addr(&self) -> SocketAddr {
    self.local_addr
  }

  /// Base URL of the entry document.
  pub fn url(&self) -> String {
    format!("http://{}/", self.local_addr)
  }

  /// Stop accepting, drain in-flight requests, and release the listener.
  pub async fn stop(mut self) -> io::Result<()> {
    if let Some(tx) = self.shutdown.take() {
      let _ = tx.send(());
    }
    match (&mut self.task).await {
      Ok(result) => result,
      Err(e) => Err(io::Error::other(e)),
    }
  }
}

impl Drop for ServerHandle {
  fn drop(&mut self) {
    if let Some(tx) = self.shutdown.take() {
      let _ = tx.send(());
    }
  }
}
