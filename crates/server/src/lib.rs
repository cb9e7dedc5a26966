//! # tabella-server
//!
//! HTTP server for the tabella conversion API: a multipart PDF upload on
//! `POST /api/convert` returns the converted xlsx workbook as an attachment.

pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use routes::{create_router, Health};
