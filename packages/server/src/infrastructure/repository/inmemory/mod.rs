//! InMemory Repository 実装
//!
//! Each collection is a `Vec` behind a `tokio::sync::Mutex`. An operation
//! locks the collection, works on it and releases it, which gives every
//! single-collection operation the atomicity a document store offers per
//! document. Nothing spans both collections.

mod message;
mod participant;

pub use message::InMemoryMessageRepository;
pub use participant::InMemoryParticipantRepository;
