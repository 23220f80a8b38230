//! Domain core of the dishnote record service.
//!
//! Holds the record kinds (notes and dishes), the person model, the storage
//! ports the services talk to, and the services themselves. Nothing in this
//! crate knows about SQL or HTTP.

pub mod allocator;
pub mod clock;
pub mod credential;
pub mod dish;
pub mod error;
pub mod note;
pub mod person;
pub mod person_service;
pub mod record;
pub mod service;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
