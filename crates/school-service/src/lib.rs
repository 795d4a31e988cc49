//! # school-service
//!
//! Application layer containing the attendance ledger, directory services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
