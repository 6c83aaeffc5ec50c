use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("local store error: {0}")]
    LocalStore(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unknown forum category: {0}")]
    UnknownCategory(Uuid),

    #[error("post {0} is locked")]
    PostLocked(Uuid),

    #[error("unknown counselor slot: {0}")]
    UnknownSlot(String),

    #[error("slot {slot_id} on {date} is not available")]
    SlotUnavailable {
        date: jiff::civil::Date,
        slot_id: String,
    },

    #[error("cannot book a session in the past: {0}")]
    BookingInPast(jiff::civil::Date),
}
