//! Alert messages for reporting the outcome of htmx requests.
//!
//! Alerts are rendered as HTML fragments and swapped out-of-band into the
//! alert container defined in [base](crate::html::base).

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message to show the user, with details on how to fix the problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    fn into_html(self) -> Markup {
        let Alert { message, details } = self;

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(ERROR_STYLE)
                {
                    p class="font-bold" { (message) }

                    @if !details.is_empty()
                    {
                        p class="text-sm" { (details) }
                    }

                    button
                        type="button"
                        class="absolute top-2 right-3 text-lg leading-none"
                        aria-label="Close"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert with an error status code.
    ///
    /// Note that htmx will only swap in responses with error codes if the
    /// response-targets extension is enabled for the triggering element.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, Html(self.into_html().into_string())).into_response()
    }
}

const ERROR_STYLE: &str = "relative p-4 rounded border border-red-300 \
    bg-red-50 text-red-800 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::test_utils::{assert_content_type, assert_valid_html, parse_html_fragment};

    use super::Alert;

    #[tokio::test]
    async fn alert_uses_given_status() {
        let response = Alert {
            message: "Oops".to_owned(),
            details: "Try again".to_owned(),
        }
        .into_response_with_status(StatusCode::NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs, vec!["Oops".to_owned(), "Try again".to_owned()]);
    }

    #[tokio::test]
    async fn empty_details_are_not_rendered() {
        let response = Alert {
            message: "Oops".to_owned(),
            details: String::new(),
        }
        .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR);

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let paragraphs = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(paragraphs, vec!["Oops".to_owned()]);
    }
}
