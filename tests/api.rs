use actix_web::http::{StatusCode, header};
use actix_web::web::Data;
use actix_web::{App, test};
use chrono::{Local, NaiveDate, TimeZone};
use serde_json::{Value, json};

use attendance_kiosk::attendance::RECORDS_KEY;
use attendance_kiosk::clock::FixedClock;
use attendance_kiosk::config::Config;
use attendance_kiosk::kiosk::{AppContext, Kiosk};
use attendance_kiosk::routes;
use attendance_kiosk::storage::MemoryKvStore;

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        data_file: "unused.json".into(),
        jwt_secret: "test-secret".into(),
        admin_token_ttl: 600,
        toast_dismiss_ms: 4000,
        log_dir: "logs".into(),
        api_prefix: "/api/v1".into(),
    }
}

fn context(store: MemoryKvStore) -> Data<AppContext> {
    let now = Local
        .from_local_datetime(
            &NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 15, 30)
                .unwrap(),
        )
        .unwrap();
    Data::new(AppContext::new(Kiosk::open(
        Box::new(store),
        Box::new(FixedClock(now)),
    )))
}

macro_rules! app {
    ($ctx:expr) => {{
        let config = test_config();
        test::init_service(
            App::new()
                .app_data($ctx.clone())
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, config.clone())),
        )
        .await
    }};
}

macro_rules! admin_token {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"password": "admin"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body["access_token"].as_str().unwrap().to_string()
    }};
}

fn set_name(name: &str) -> test::TestRequest {
    test::TestRequest::put()
        .uri("/api/v1/kiosk/name")
        .set_json(json!({ "name": name }))
}

fn scan(text: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/kiosk/scan")
        .set_json(json!({ "decodedText": text }))
}

fn clock(kind: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(&format!("/api/v1/attendance/clock-{kind}"))
}

#[actix_web::test]
async fn clock_in_requires_a_scan() {
    let ctx = context(MemoryKvStore::new());
    let app = app!(ctx);

    test::call_service(&app, set_name("Alice").to_request()).await;
    let resp = test::call_service(&app, clock("in").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "打刻にはQRスキャンが必要です");
    assert_eq!(body["severity"], "error");
    assert_eq!(body["dismissAfterMs"], 4000);
}

#[actix_web::test]
async fn scan_then_clock_in_and_out() {
    let ctx = context(MemoryKvStore::new());
    let app = app!(ctx);

    test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/kiosk/language")
            .set_json(json!({"language": "en"}))
            .to_request(),
    )
    .await;
    test::call_service(&app, set_name("Alice").to_request()).await;

    let resp = test::call_service(&app, scan("KUMAMOTO_HIGO").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Verified");

    let resp = test::call_service(&app, clock("in").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["toast"]["message"], "Clock-in recorded!");
    assert_eq!(body["record"]["name"], "Alice");
    assert_eq!(body["record"]["date"], "2026-10-19");
    assert_eq!(body["record"]["clockIn"], "09:15:30");
    assert!(body["record"]["clockOut"].is_null());
    assert_eq!(body["record"]["status"], "pending");

    // the verification was spent on the clock-in
    let resp = test::call_service(&app, clock("out").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    test::call_service(&app, scan("KUMAMOTO_HIGO").to_request()).await;
    let resp = test::call_service(&app, clock("out").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["record"]["clockOut"], "09:15:30");

    test::call_service(&app, scan("KUMAMOTO_HIGO").to_request()).await;
    let resp = test::call_service(&app, clock("out").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Already clocked out.");

    assert_eq!(ctx.lock().records().len(), 1);
}

#[actix_web::test]
async fn wrong_token_and_scanner_failures_are_classified() {
    let ctx = context(MemoryKvStore::new().with_entry("lang", "en"));
    let app = app!(ctx);

    let resp = test::call_service(&app, scan("SOMETHING_ELSE").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid QR Code.");

    for (failure, message) in [
        ("decode_failed", "Scan failed."),
        ("camera_denied", "Camera access denied."),
        ("library_unavailable", "Scanner could not be loaded."),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/kiosk/scan")
            .set_json(json!({ "failure": failure }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], message);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/kiosk/scan")
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/v1/kiosk").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["gate"], "unverified");
    assert_eq!(state["hint"], "Scan QR to unlock buttons");
}

#[actix_web::test]
async fn editing_the_name_relocks_the_buttons() {
    let ctx = context(MemoryKvStore::new());
    let app = app!(ctx);

    test::call_service(&app, set_name("Alice").to_request()).await;
    test::call_service(&app, scan("KUMAMOTO_HIGO").to_request()).await;

    let req = test::TestRequest::get().uri("/api/v1/kiosk").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["gate"], "verified");
    assert!(state["hint"].is_null());

    test::call_service(&app, set_name("Alice B").to_request()).await;

    let req = test::TestRequest::get().uri("/api/v1/kiosk").to_request();
    let state: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state["gate"], "unverified");
    assert_eq!(state["employeeName"], "Alice B");
}

#[actix_web::test]
async fn admin_routes_need_a_token() {
    let ctx = context(MemoryKvStore::new());
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/admin/records").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/records")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"password": "Admin"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["severity"], "error");
}

#[actix_web::test]
async fn admin_reviews_sorts_and_exports() {
    let seeded = json!([
        {"id": 3, "date": "2026-10-19", "name": "Carol", "clockIn": "09:00:00", "clockOut": null, "status": "pending"},
        {"id": 2, "date": "2026-10-18", "name": "Bob", "clockIn": "08:30:00", "clockOut": "17:00:00", "status": "pending"},
        {"id": 1, "date": "2026-10-17", "name": "Alice", "clockIn": "08:00:00", "clockOut": "16:00:00", "status": "approved"}
    ]);
    let ctx = context(
        MemoryKvStore::new()
            .with_entry(RECORDS_KEY, seeded.to_string())
            .with_entry("lang", "en"),
    );
    let app = app!(ctx);
    let token = admin_token!(app);
    let bearer = (header::AUTHORIZATION, format!("Bearer {token}"));

    // default order: newest id first
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/records")
        .insert_header(bearer.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i64> = body["data"].as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [3, 2, 1]);
    assert_eq!(body["total"], 3);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/records?sort=clockOut&order=asc")
        .insert_header(bearer.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<i64> = body["data"].as_array().unwrap().iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);

    for status in ["approved", "rejected", "pending", "pending"] {
        let req = test::TestRequest::put()
            .uri("/api/v1/admin/records/3/status")
            .insert_header(bearer.clone())
            .set_json(json!({ "status": status }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["record"]["status"], status);
        assert_eq!(body["toast"]["message"], "Updated.");
    }

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/records/404/status")
        .insert_header(bearer.clone())
        .set_json(json!({ "status": "approved" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/records/export?sort=date&order=asc")
        .insert_header(bearer)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attendance_2026-10-19.csv"), "{disposition}");

    let body = test::read_body(resp).await;
    assert_eq!(
        std::str::from_utf8(&body).unwrap(),
        "\u{FEFF}Date,Name,In,Out,Status\n\
         2026-10-17,Alice,08:00:00,16:00:00,approved\n\
         2026-10-18,Bob,08:30:00,17:00:00,pending\n\
         2026-10-19,Carol,09:00:00,-,pending"
    );
}

#[actix_web::test]
async fn malformed_store_boots_empty() {
    let ctx = context(MemoryKvStore::new().with_entry(RECORDS_KEY, "{not json"));
    let app = app!(ctx);
    let token = admin_token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/records")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
}
