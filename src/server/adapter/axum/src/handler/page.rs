/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use super::AppState;

pub(super) async fn handle_index(State(state): State<Arc<AppState>>) -> Html<String> {
  Html(state.parts.render_index())
}
