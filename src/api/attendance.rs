use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::api::{Toast, toast_error};
use crate::attendance::PunchKind;
use crate::config::Config;
use crate::i18n::Notice;
use crate::kiosk::AppContext;
use crate::model::AttendanceRecord;

#[derive(Serialize, ToSchema)]
pub struct PunchResponse {
    pub toast: Toast,
    pub record: AttendanceRecord,
}

fn punch_for(kind: PunchKind, ctx: &AppContext, config: &Config) -> HttpResponse {
    let mut kiosk = ctx.lock();
    let language = kiosk.language();

    match kiosk.punch(kind) {
        Ok(record) => {
            let notice = match kind {
                PunchKind::In => Notice::ClockedIn,
                PunchKind::Out => Notice::ClockedOut,
            };
            HttpResponse::Ok().json(PunchResponse {
                toast: Toast::new(notice, language, config),
                record,
            })
        }
        Err(e) => {
            info!(%kind, error = %e, "Punch refused");
            toast_error(&e, language, config)
        }
    }
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-in",
    responses(
        (status = 200, description = "Clocked in successfully", body = PunchResponse),
        (status = 400, description = "Name missing, not verified, or already clocked in today", body = Toast, example = json!({
            "message": "Already clocked in.",
            "severity": "error",
            "dismissAfterMs": 4000
        })),
        (status = 500, description = "Store write failed", body = Toast)
    ),
    tag = "Attendance"
)]
#[instrument(name = "clock_in", skip_all)]
pub async fn clock_in(ctx: web::Data<AppContext>, config: web::Data<Config>) -> impl Responder {
    punch_for(PunchKind::In, &ctx, &config)
}

/// Clock-out endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/clock-out",
    responses(
        (status = 200, description = "Clocked out successfully", body = PunchResponse),
        (status = 400, description = "Name missing, not verified, no clock-in today, or already clocked out", body = Toast, example = json!({
            "message": "Clock in first.",
            "severity": "error",
            "dismissAfterMs": 4000
        })),
        (status = 500, description = "Store write failed", body = Toast)
    ),
    tag = "Attendance"
)]
#[instrument(name = "clock_out", skip_all)]
pub async fn clock_out(ctx: web::Data<AppContext>, config: web::Data<Config>) -> impl Responder {
    punch_for(PunchKind::Out, &ctx, &config)
}
