//! mindwell-audit
//!
//! Application-level audit events, emitted through `tracing` under the
//! `audit` target.

pub mod events;
