//! Request handlers.

pub mod http;
