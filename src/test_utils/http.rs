use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
fn header_value<'a>(response: &'a Response<Body>, header_name: &str) -> &'a str {
    response
        .headers()
        .get(header_name)
        .unwrap_or_else(|| panic!("{header_name} header missing"))
        .to_str()
        .unwrap_or_else(|error| panic!("{header_name} header is not valid text: {error}"))
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    assert_eq!(header_value(response, "content-type"), content_type);
}

/// Assert the response tells htmx to navigate to `endpoint`.
#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, endpoint: &str) {
    assert_eq!(header_value(response, "hx-redirect"), endpoint);
}

/// Assert the response tells htmx to reload the current page.
#[track_caller]
pub(crate) fn assert_hx_refresh(response: &Response<Body>) {
    assert_eq!(header_value(response, "hx-refresh"), "true");
}
