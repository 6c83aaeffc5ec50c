//! mindwell-storage
//!
//! S3 record storage for the service and file-backed local storage for
//! device-side session data.

pub mod client;
pub mod error;
pub mod local;
pub mod objects;
pub mod state;
