//! Object key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of records in the MindWell bucket.

use uuid::Uuid;

pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub fn assessment(id: Uuid) -> String {
    format!("assessments/{id}.json")
}

pub const CHAT_INTERACTIONS_PREFIX: &str = "chat-interactions/";

pub fn chat_interaction(id: Uuid) -> String {
    format!("chat-interactions/{id}.json")
}

pub const RESOURCES_PREFIX: &str = "resources/";

pub fn resource(id: Uuid) -> String {
    format!("resources/{id}.json")
}

pub fn resource_feedback(resource_id: Uuid, feedback_id: Uuid) -> String {
    format!("resource-feedback/{resource_id}/{feedback_id}.json")
}

pub const FORUM_CATEGORIES_PREFIX: &str = "forum/categories/";

pub const FORUM_POSTS_PREFIX: &str = "forum/posts/";

pub fn forum_post(id: Uuid) -> String {
    format!("forum/posts/{id}.json")
}

pub const BOOKINGS_PREFIX: &str = "bookings/records/";

pub fn booking(id: Uuid) -> String {
    format!("bookings/records/{id}.json")
}

/// Claim marker for a counselor slot on a given day. Written create-only so
/// two bookings can never hold the same slot.
pub fn booking_claim(date: jiff::civil::Date, slot_id: &str) -> String {
    format!("bookings/claims/{date}/{slot_id}.json")
}

pub fn booking_claims_prefix(date: jiff::civil::Date) -> String {
    format!("bookings/claims/{date}/")
}

/// Slot id encoded in a claim key, e.g. `"3"` for
/// `bookings/claims/2025-03-10/3.json`.
pub fn claimed_slot_id(key: &str) -> Option<&str> {
    key.strip_prefix("bookings/claims/")?
        .rsplit('/')
        .next()?
        .strip_suffix(".json")
}
