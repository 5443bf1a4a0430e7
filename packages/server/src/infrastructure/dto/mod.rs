//! Data Transfer Objects (DTOs) for the HTTP API.
//!
//! - `http`: request bodies and response payloads
//! - `conversion`: mapping between DTOs and domain entities

pub mod conversion;
pub mod http;
