//! Chat room backend library.
//!
//! Participants register a display name, post public or private messages and
//! poll for the messages visible to them. A background sweep removes
//! participants that stopped sending keep-alives.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
