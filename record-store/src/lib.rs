//! Record store for the AlphaScript Engine
//!
//! Patients, recordings, reports and templates live behind the
//! [`RecordStore`] trait. Every operation takes the id of the requesting user
//! and only ever sees rows that user owns; a row owned by someone else is
//! reported as not found, the same way a row-level-security policy hides it.
//!
//! [`InMemoryStore`] is the implementation used by the server and the tests.

pub mod error;
pub mod models;
pub mod store;
pub mod memory;

pub use error::*;
pub use models::*;
pub use store::*;
pub use memory::InMemoryStore;
