use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::api::{Toast, toast_error};
use crate::attendance::{SortField, SortOrder};
use crate::auth::auth::AdminSession;
use crate::config::Config;
use crate::i18n::Notice;
use crate::kiosk::AppContext;
use crate::model::{AttendanceRecord, Status};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// id, date, name, clockIn, clockOut or status (default id)
    #[param(value_type = Option<String>, example = "date")]
    pub sort: Option<SortField>,
    /// asc or desc (default desc)
    #[param(value_type = Option<String>, example = "asc")]
    pub order: Option<SortOrder>,
}

impl SortQuery {
    fn resolve(&self) -> (SortField, SortOrder) {
        (self.sort.unwrap_or_default(), self.order.unwrap_or_default())
    }
}

#[derive(Serialize, ToSchema)]
pub struct RecordListResponse {
    pub data: Vec<AttendanceRecord>,
    pub sort: SortField,
    pub order: SortOrder,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusUpdate {
    pub status: Status,
}

#[derive(Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub toast: Toast,
    pub record: AttendanceRecord,
}

/// List all records in the requested order
#[utoipa::path(
    get,
    path = "/api/v1/admin/records",
    params(SortQuery),
    responses(
        (status = 200, description = "Sorted records", body = RecordListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn list_records(
    admin: AdminSession,
    ctx: web::Data<AppContext>,
    query: web::Query<SortQuery>,
) -> impl Responder {
    let (sort, order) = query.resolve();
    debug!(jti = %admin.jti, %sort, %order, "Listing records");

    let data = ctx.lock().sorted_records(sort, order);
    HttpResponse::Ok().json(RecordListResponse {
        total: data.len(),
        data,
        sort,
        order,
    })
}

/// Approve, reject or reset a record
#[utoipa::path(
    put,
    path = "/api/v1/admin/records/{id}/status",
    params(("id" = i64, Path, description = "Record id")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status set", body = StatusUpdateResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No such record", body = Toast)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(name = "set_status", skip(admin, ctx, config, payload))]
pub async fn set_status(
    admin: AdminSession,
    ctx: web::Data<AppContext>,
    config: web::Data<Config>,
    path: web::Path<i64>,
    payload: web::Json<StatusUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    let mut kiosk = ctx.lock();
    let language = kiosk.language();

    match kiosk.set_status(id, payload.status) {
        Ok(record) => {
            info!(jti = %admin.jti, id, status = %record.status, "Status updated by admin");
            HttpResponse::Ok().json(StatusUpdateResponse {
                toast: Toast::new(Notice::StatusUpdated, language, &config),
                record,
            })
        }
        Err(e) => toast_error(&e, language, &config),
    }
}

/// Download all records as CSV
#[utoipa::path(
    get,
    path = "/api/v1/admin/records/export",
    params(SortQuery),
    responses(
        (status = 200, description = "UTF-8 CSV with byte-order mark", content_type = "text/csv"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
pub async fn export_records(
    admin: AdminSession,
    ctx: web::Data<AppContext>,
    query: web::Query<SortQuery>,
) -> impl Responder {
    let (sort, order) = query.resolve();
    let (filename, body) = ctx.lock().export_csv(sort, order);
    info!(jti = %admin.jti, %filename, bytes = body.len(), "CSV exported");

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(body)
}
