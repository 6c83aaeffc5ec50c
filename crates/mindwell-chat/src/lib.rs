//! mindwell-chat
//!
//! Rule-based support chat: crisis keyword detection, keyword-triggered
//! canned replies, and the chat session that stages replies behind a short
//! typing delay.

pub mod crisis;
pub mod error;
pub mod personalize;
pub mod rules;
pub mod session;
