use crate::{
    api::{admin, attendance, kiosk},
    auth::{handlers, middleware::admin_middleware},
    config::Config,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(web::resource("/login").route(web::post().to(handlers::login)))
            .service(web::resource("/logout").route(web::post().to(handlers::logout))),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/kiosk")
                    // /kiosk
                    .service(web::resource("").route(web::get().to(kiosk::get_state)))
                    .service(web::resource("/name").route(web::put().to(kiosk::set_name)))
                    .service(
                        web::resource("/language").route(web::put().to(kiosk::set_language)),
                    )
                    .service(web::resource("/scan").route(web::post().to(kiosk::scan))),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("/clock-in").route(web::post().to(attendance::clock_in)),
                    )
                    .service(
                        web::resource("/clock-out").route(web::post().to(attendance::clock_out)),
                    ),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .wrap(from_fn(admin_middleware))
                    // /admin/records
                    .service(web::resource("/records").route(web::get().to(admin::list_records)))
                    // /admin/records/export
                    .service(
                        web::resource("/records/export")
                            .route(web::get().to(admin::export_records)),
                    )
                    // /admin/records/{id}/status
                    .service(
                        web::resource("/records/{id}/status")
                            .route(web::put().to(admin::set_status)),
                    ),
            ),
    );
}

// KIOSK
//  ├─ PUT  /kiosk/name        (revokes verification)
//  ├─ POST /kiosk/scan        (KUMAMOTO_HIGO unlocks one punch)
//  └─ POST /attendance/clock-in | clock-out

// ADMIN
//  ├─ POST /auth/login        password -> bearer token
//  └─ /admin/*                Authorization: Bearer token
