//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for the small fixed-shape replies

pub mod requests;
pub mod responses;

pub use requests::AnalyzeRequest;
pub use responses::{HealthResponse, StatusResponse};
