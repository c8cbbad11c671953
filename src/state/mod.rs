//! Local state of the application.
//!  - Every document is a single JSON file inside the state directory.
//!  - Reads and writes always cover the whole file, there are no partial updates and no locking.
//!  - A missing file means "no document", a file that can't be parsed is reported as corrupt.

pub mod entities;
pub mod store;

pub use store::{StateKey, StateStore, StoreError};
