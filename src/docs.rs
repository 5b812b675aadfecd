use crate::api::Toast;
use crate::api::admin::{RecordListResponse, StatusUpdate, StatusUpdateResponse};
use crate::api::attendance::PunchResponse;
use crate::api::kiosk::{KioskState, LanguageUpdate, NameUpdate, ScanReport};
use crate::attendance::{GateState, SortField, SortOrder};
use crate::i18n::Severity;
use crate::model::{AttendanceRecord, Language, Status};
use crate::models::{AdminLoginReq, AdminLoginResponse};
use crate::scanner::ScanFailure;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Kiosk API",
        version = "0.1.0",
        description = r#"
## Attendance Kiosk

Local API behind a single attendance terminal.

### Key Features
- **Punch**
  - Type a name, scan the kiosk QR code, then clock in or clock out once
- **Admin Review**
  - Sort records, approve / reject / reset them, export CSV

### Security
The admin endpoints need a bearer token obtained from `/auth/login` with the shared
admin password. Kiosk endpoints are open.

### Response Format
Every outcome shown to the employee is a localized toast
(`message`, `severity`, `dismissAfterMs`).
"#,
    ),
    paths(
        crate::api::kiosk::get_state,
        crate::api::kiosk::set_name,
        crate::api::kiosk::set_language,
        crate::api::kiosk::scan,

        crate::api::attendance::clock_in,
        crate::api::attendance::clock_out,

        crate::auth::handlers::login,
        crate::auth::handlers::logout,

        crate::api::admin::list_records,
        crate::api::admin::set_status,
        crate::api::admin::export_records
    ),
    components(
        schemas(
            AttendanceRecord,
            Status,
            Language,
            GateState,
            SortField,
            SortOrder,
            ScanFailure,
            Severity,
            Toast,
            KioskState,
            NameUpdate,
            LanguageUpdate,
            ScanReport,
            PunchResponse,
            RecordListResponse,
            StatusUpdate,
            StatusUpdateResponse,
            AdminLoginReq,
            AdminLoginResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Kiosk", description = "Name field, language and QR verification"),
        (name = "Attendance", description = "Clock-in and clock-out"),
        (name = "Admin", description = "Admin session and record review"),
    )
)]
pub struct ApiDoc;

pub struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
