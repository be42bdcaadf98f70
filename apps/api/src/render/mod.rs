//! Rendered-data contract handed to the template layer.
//!
//! Every GET page is a [`Page`]: the template to render, the one-shot
//! notices to display, and the page data flattened alongside. Form posts
//! answer with a See Other redirect whose `notice` query parameter names a
//! [`NoticeCode`]; the next page resolves it back to a fixed message.

pub mod notice;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub use notice::{Notice, NoticeCode, NoticeLevel};

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub template: &'static str,
    pub notices: Vec<Notice>,
    #[serde(flatten)]
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, data: T) -> Self {
        Page {
            template,
            notices: Vec::new(),
            data,
            status: StatusCode::OK,
        }
    }

    pub fn with_notice(mut self, code: NoticeCode) -> Self {
        self.notices.push(code.into());
        self
    }

    /// Carries over the notice named by a redirect, if any.
    pub fn with_flash(mut self, flash: &FlashQuery) -> Self {
        self.notices.extend(flash.notice());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Query string of a page reached through a post-redirect-get.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub notice: Option<String>,
}

impl FlashQuery {
    /// Unknown codes are dropped so clients cannot inject notice text.
    pub fn notice(&self) -> Option<Notice> {
        self.notice
            .as_deref()
            .and_then(NoticeCode::from_code)
            .map(Notice::from)
    }
}

/// 303 redirect to `path` carrying a one-shot notice.
pub fn redirect_with_notice(path: &str, code: NoticeCode) -> Redirect {
    Redirect::to(&format!("{path}?notice={}", code.as_str()))
}
