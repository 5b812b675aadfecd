use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

use attendance_kiosk::clock::SystemClock;
use attendance_kiosk::config::Config;
use attendance_kiosk::docs::ApiDoc;
use attendance_kiosk::i18n::messages;
use attendance_kiosk::kiosk::{AppContext, Kiosk};
use attendance_kiosk::routes;
use attendance_kiosk::storage::FileKvStore;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index(ctx: Data<AppContext>) -> impl Responder {
    messages(ctx.lock().language()).title
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendance.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Kiosk starting...");

    let store = FileKvStore::open(&config.data_file)
        .with_context(|| format!("opening store {}", config.data_file.display()))?;
    info!(path = %store.path().display(), "Store opened");

    let ctx = Data::new(AppContext::new(Kiosk::open(
        Box::new(store),
        Box::new(SystemClock),
    )));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    info!(addr = %server_addr, "Listening");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(ctx.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
