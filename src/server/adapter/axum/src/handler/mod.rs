/* src/server/adapter/axum/src/handler/mod.rs */

mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use folio_server::FolioParts;
use tower_http::services::ServeDir;

pub(crate) struct AppState {
  pub parts: FolioParts,
}

/// `GET /` renders the page; every other path falls through to the public
/// directory (404 when it is not configured or the file is missing).
pub(crate) fn build_router(parts: FolioParts) -> Router {
  let public_dir = parts.public_dir.clone();
  let state = Arc::new(AppState { parts });
  let router = Router::new().route("/", get(page::handle_index)).with_state(state);
  match public_dir {
    Some(dir) => router.fallback_service(ServeDir::new(dir)),
    None => router,
  }
}

#[cfg(test)]
mod tests {
  use axum::body::Body;
  use axum::http::{Request, StatusCode, header};
  use folio_server::folio_engine::Identity;
  use folio_server::{FolioServer, PageData};
  use http_body_util::BodyExt;
  use tower::ServiceExt;

  use super::*;

  fn parts(public_dir: Option<&std::path::Path>) -> FolioParts {
    let page = PageData::new(Identity { name: "Ada Lovelace".into(), ..Identity::default() });
    let server = FolioServer::new(page);
    let server = match public_dir {
      Some(dir) => server.public_dir(dir),
      None => server,
    };
    server.into_parts().unwrap()
  }

  async fn fetch(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response =
      router.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response
      .headers()
      .get(header::CONTENT_TYPE)
      .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
  }

  #[tokio::test]
  async fn root_renders_html() {
    let (status, content_type, body) = fetch(build_router(parts(None)), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    let body = String::from_utf8(body).unwrap();
    assert!(body.starts_with("<!doctype html>"));
    assert!(body.contains("<title>Ada Lovelace</title>"));
  }

  #[tokio::test]
  async fn root_is_identical_across_requests() {
    let router = build_router(parts(None));
    let (_, _, first) = fetch(router.clone(), "/").await;
    let (_, _, second) = fetch(router, "/").await;
    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn nested_assets_served_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("stylesheets/fonts")).unwrap();
    std::fs::write(dir.path().join("stylesheets/styles.css"), "body{margin:0}").unwrap();
    std::fs::write(dir.path().join("stylesheets/fonts/a.woff2"), [0u8, 159, 146, 150]).unwrap();
    let router = build_router(parts(Some(dir.path())));

    let (status, _, body) = fetch(router.clone(), "/stylesheets/styles.css").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body{margin:0}");

    let (status, _, body) = fetch(router, "/stylesheets/fonts/a.woff2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vec![0u8, 159, 146, 150]);
  }

  #[tokio::test]
  async fn unknown_paths_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, _) = fetch(build_router(parts(Some(dir.path()))), "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = fetch(build_router(parts(None)), "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
