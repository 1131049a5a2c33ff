//! Lesson backend client
//!
//! One POST per submission to `{base_url}/lesson`, with the base URL chosen
//! from the page hostname. A client-side deadline aborts hung requests so
//! the submit control never stays disabled forever.

use dioxus_logger::tracing::error;
use futures_util::future::{Either, select};
use futures_util::pin_mut;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use studyspark_types::{ApiEnv, LessonError, LessonRequest, LessonResponse};

use crate::dom;

/// Deadline for one lesson round trip.
const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Base URL of the lesson backend for the current page.
pub fn base_url() -> &'static str {
    let hostname = dom::hostname().unwrap_or_default();
    ApiEnv::from_hostname(&hostname).base_url()
}

/// Send one lesson request and parse the reply.
///
/// Fails with `RequestFailed` on a non-2xx status or an `error` field in the
/// body (whichever message is available), and with `TimedOut` when the
/// deadline wins the race against the round trip.
pub async fn generate_lesson(request: &LessonRequest) -> Result<LessonResponse, LessonError> {
    let url = format!("{}/lesson", base_url());
    let body = serde_json::to_string(request).map_err(|err| {
        error!("failed to encode lesson request: {err}");
        LessonError::from_server(None)
    })?;

    let headers = web_sys::Headers::new().map_err(js_failure)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_failure)?;

    let abort = web_sys::AbortController::new().map_err(js_failure)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(&body));
    init.set_signal(Some(&abort.signal()));

    let fetch_request =
        web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_failure)?;

    let window = web_sys::window().ok_or_else(|| LessonError::from_server(None))?;

    // One deadline covers the whole round trip, fetch and body read alike.
    // Losing the race aborts the in-flight request; nothing outlives it.
    let round_trip = async {
        let response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(js_failure)?;
        let response: web_sys::Response = response.dyn_into().map_err(js_failure)?;
        let json = JsFuture::from(response.json().map_err(js_failure)?)
            .await
            .map_err(js_failure)?;
        Ok::<_, LessonError>((response, json))
    };
    pin_mut!(round_trip);

    let (response, json) = match select(round_trip, TimeoutFuture::new(REQUEST_TIMEOUT_MS)).await {
        Either::Left((settled, _)) => settled?,
        Either::Right(((), _)) => {
            abort.abort();
            return Err(LessonError::TimedOut);
        }
    };

    let parsed: LessonResponse = serde_wasm_bindgen::from_value(json).map_err(|err| {
        error!("unparseable lesson response: {err}");
        LessonError::from_server(None)
    })?;

    // An error field wins over the status line: it carries the message.
    if parsed.error.is_some() {
        return Err(LessonError::from_server(parsed.error));
    }
    if !response.ok() {
        return Err(LessonError::from_server(None));
    }
    Ok(parsed)
}

/// Map a thrown JS value to a request failure, keeping its message when one
/// exists.
fn js_failure(err: JsValue) -> LessonError {
    error!("lesson request failed: {err:?}");
    let message = err.as_string().or_else(|| {
        js_sys::Reflect::get(&err, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
    });
    LessonError::from_server(message)
}
