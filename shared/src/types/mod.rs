//! Type definitions shared by the API layer
//!
//! - `response` - API response wrapper and health checks

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
