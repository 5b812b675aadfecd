pub mod api;
pub mod attendance;
pub mod auth;
pub mod clock;
pub mod config;
pub mod docs;
pub mod error;
pub mod i18n;
pub mod kiosk;
pub mod model;
pub mod models;
pub mod routes;
pub mod scanner;
pub mod storage;
