pub mod analytics;
pub mod assessment;
pub mod booking;
pub mod chat;
pub mod forum;
pub mod locale;
pub mod resource;
