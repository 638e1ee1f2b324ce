/* src/client/controller/wasm/src/timer.rs */

use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;

/// Resolve after `ms` milliseconds using `setTimeout`.
pub(crate) async fn sleep(ms: u64) {
  let Some(window) = web_sys::window() else {
    return std::future::pending().await;
  };
  let ms = i32::try_from(ms).unwrap_or(i32::MAX);
  let promise = Promise::new(&mut |resolve, _reject| {
    if window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms).is_err() {
      web_sys::console::error_1(&"setTimeout unavailable".into());
    }
  });
  let _ = JsFuture::from(promise).await;
}
