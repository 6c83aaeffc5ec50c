//! mindwell-auth
//!
//! Bearer token validation for the administrative dashboard.

pub mod error;
pub mod jwt;
