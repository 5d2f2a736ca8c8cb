//! # examiner-server
//!
//! actix-web surface for the answer examiner:
//!
//! - `POST /api/evaluate` evaluates an answer
//! - `GET /` returns a plain-text banner
//! - `GET /health/live` and `GET /health/ready` serve as probes
//!
//! The binary lives in `main.rs`; everything here is usable from tests.

pub mod api;
pub mod app;
pub mod config;

pub use app::{AppError, AppState};
pub use config::ServerConfig;
