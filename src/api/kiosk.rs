use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::api::{Toast, toast_error};
use crate::attendance::{GateState, ScanOutcome};
use crate::config::Config;
use crate::error::AppError;
use crate::i18n::{Notice, messages};
use crate::kiosk::AppContext;
use crate::model::Language;
use crate::scanner::{ReportedScan, ScanEvent, ScanFailure};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KioskState {
    #[schema(example = "Alice")]
    pub employee_name: String,
    pub language: Language,
    pub gate: GateState,
    #[schema(example = "Attendance System")]
    pub title: String,
    /// Shown while scanning.
    pub scan_instructions: String,
    /// Shown while the punch buttons are locked; absent once verified.
    pub hint: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct NameUpdate {
    #[schema(example = "Alice")]
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LanguageUpdate {
    pub language: Language,
}

/// What the kiosk page's decoder produced. Both fields empty means the user left the
/// scanner without a result.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    #[schema(example = "KUMAMOTO_HIGO")]
    pub decoded_text: Option<String>,
    pub failure: Option<ScanFailure>,
}

impl ScanReport {
    fn into_event(self) -> Option<ScanEvent> {
        match (self.failure, self.decoded_text) {
            (Some(failure), _) => Some(ScanEvent::Failed(failure)),
            (None, Some(text)) => Some(ScanEvent::Decoded(text)),
            (None, None) => None,
        }
    }
}

/// Current kiosk screen state
#[utoipa::path(
    get,
    path = "/api/v1/kiosk",
    responses((status = 200, description = "Kiosk state", body = KioskState)),
    tag = "Kiosk"
)]
pub async fn get_state(ctx: web::Data<AppContext>) -> impl Responder {
    let kiosk = ctx.lock();
    let language = kiosk.language();
    let m = messages(language);
    let gate = kiosk.gate_state();

    HttpResponse::Ok().json(KioskState {
        employee_name: kiosk.employee_name().to_string(),
        language,
        gate,
        title: m.title.to_string(),
        scan_instructions: m.scan_instructions.to_string(),
        hint: (gate == GateState::Unverified).then(|| m.qr_required.to_string()),
    })
}

/// Edit the employee-name field
#[utoipa::path(
    put,
    path = "/api/v1/kiosk/name",
    request_body = NameUpdate,
    responses((status = 204, description = "Name stored, verification revoked")),
    tag = "Kiosk"
)]
pub async fn set_name(
    ctx: web::Data<AppContext>,
    payload: web::Json<NameUpdate>,
) -> impl Responder {
    ctx.lock().set_employee_name(payload.into_inner().name);
    HttpResponse::NoContent().finish()
}

/// Switch and persist the display language
#[utoipa::path(
    put,
    path = "/api/v1/kiosk/language",
    request_body = LanguageUpdate,
    responses(
        (status = 204, description = "Language stored"),
        (status = 500, description = "Store write failed", body = Toast)
    ),
    tag = "Kiosk"
)]
pub async fn set_language(
    ctx: web::Data<AppContext>,
    config: web::Data<Config>,
    payload: web::Json<LanguageUpdate>,
) -> impl Responder {
    let mut kiosk = ctx.lock();
    match kiosk.set_language(payload.language) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => toast_error(&AppError::from(e), kiosk.language(), &config),
    }
}

/// Report a QR scan result
#[utoipa::path(
    post,
    path = "/api/v1/kiosk/scan",
    request_body = ScanReport,
    responses(
        (status = 200, description = "Kiosk verified", body = Toast),
        (status = 204, description = "Scan cancelled"),
        (status = 400, description = "Wrong token or scanner failure", body = Toast)
    ),
    tag = "Kiosk"
)]
#[instrument(name = "kiosk_scan", skip_all)]
pub async fn scan(
    ctx: web::Data<AppContext>,
    config: web::Data<Config>,
    payload: web::Json<ScanReport>,
) -> impl Responder {
    let mut source = ReportedScan::new(payload.into_inner().into_event());
    let mut kiosk = ctx.lock();
    let language = kiosk.language();

    match kiosk.scan(&mut source) {
        Ok(ScanOutcome::Verified) => {
            HttpResponse::Ok().json(Toast::new(Notice::Verified, language, &config))
        }
        Ok(ScanOutcome::Cancelled) => HttpResponse::NoContent().finish(),
        Err(e) => {
            debug!(error = %e, "Scan rejected");
            toast_error(&e, language, &config)
        }
    }
}
