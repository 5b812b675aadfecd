pub mod admin;
pub mod attendance;
pub mod kiosk;

use actix_web::HttpResponse;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::AppError;
use crate::i18n::{Notice, Severity};
use crate::model::Language;

/// A transient message for the kiosk page, dismissed after `dismiss_after_ms`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "message": "Clock-in recorded!",
    "severity": "success",
    "dismissAfterMs": 4000
}))]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub dismiss_after_ms: u64,
}

impl Toast {
    pub fn new(notice: Notice, language: Language, config: &Config) -> Self {
        Self {
            message: notice.text(language).to_string(),
            severity: notice.severity(),
            dismiss_after_ms: config.toast_dismiss_ms,
        }
    }
}

/// Maps a failed operation to its status code and localized toast.
pub fn toast_error(err: &AppError, language: Language, config: &Config) -> HttpResponse {
    if let AppError::Storage(e) = err {
        error!(error = %e, "Failed to persist kiosk state");
    }

    HttpResponse::build(err.status_code()).json(Toast::new(err.notice(), language, config))
}
