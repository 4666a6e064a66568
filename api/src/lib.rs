//! # Consultly API
//!
//! HTTP surface for consultant mobile verification and password reset.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
