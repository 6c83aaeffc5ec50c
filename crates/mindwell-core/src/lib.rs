//! mindwell-core
//!
//! Pure domain types, the local key-value store interface, and object key
//! conventions. No AWS SDK dependency; this is the shared vocabulary of the
//! MindWell system.

pub mod error;
pub mod local_store;
pub mod models;
pub mod object_keys;
