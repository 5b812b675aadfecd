use actix_web::{HttpResponse, Responder, web};
use tracing::{error, info, instrument};

use crate::{
    api::toast_error,
    auth::{jwt::generate_admin_token, password::verify_admin_password},
    config::Config,
    error::AppError,
    kiosk::AppContext,
    models::{AdminLoginReq, AdminLoginResponse},
};

/// Admin login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = AdminLoginReq,
    responses(
        (status = 200, description = "Admin screen unlocked", body = AdminLoginResponse),
        (status = 401, description = "Wrong password", body = crate::api::Toast)
    ),
    tag = "Admin"
)]
#[instrument(name = "admin_login", skip_all)]
pub async fn login(
    payload: web::Json<AdminLoginReq>,
    ctx: web::Data<AppContext>,
    config: web::Data<Config>,
) -> impl Responder {
    if !verify_admin_password(&payload.password) {
        info!("Admin login refused");
        let language = ctx.lock().language();
        return toast_error(&AppError::InvalidAdminPassword, language, &config);
    }

    match generate_admin_token(&config.jwt_secret, config.admin_token_ttl) {
        Ok((access_token, claims)) => {
            info!(jti = %claims.jti, "Admin login successful");
            HttpResponse::Ok().json(AdminLoginResponse {
                access_token,
                expires_in: config.admin_token_ttl,
            })
        }
        Err(e) => {
            error!(error = %e, "Failed to sign admin token");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Admin logout. Tokens are not tracked, so this always succeeds and the kiosk page
/// simply forgets its token.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Logged out")),
    tag = "Admin"
)]
pub async fn logout() -> impl Responder {
    HttpResponse::NoContent().finish()
}
