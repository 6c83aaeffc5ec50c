use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionType {
    Video,
    Phone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionMode {
    #[default]
    Online,
    InPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// A recurring daily counselor slot.
#[derive(Debug, Clone, Copy)]
pub struct SlotDefinition {
    pub id: &'static str,
    pub time: &'static str,
    pub counselor: &'static str,
    pub session_type: SessionType,
    /// `false` for slots the counselor has blocked out.
    pub offered: bool,
}

#[rustfmt::skip]
pub const DAILY_SLOTS: [SlotDefinition; 7] = [
    SlotDefinition { id: "1", time: "09:00 AM", counselor: "Dr. Sarah Chen", session_type: SessionType::Video, offered: true },
    SlotDefinition { id: "2", time: "10:00 AM", counselor: "Dr. Mike Rodriguez", session_type: SessionType::Phone, offered: false },
    SlotDefinition { id: "3", time: "11:00 AM", counselor: "Dr. Priya Sharma", session_type: SessionType::Video, offered: true },
    SlotDefinition { id: "4", time: "02:00 PM", counselor: "Dr. Sarah Chen", session_type: SessionType::Video, offered: true },
    SlotDefinition { id: "5", time: "03:00 PM", counselor: "Dr. James Wilson", session_type: SessionType::Phone, offered: true },
    SlotDefinition { id: "6", time: "04:00 PM", counselor: "Dr. Priya Sharma", session_type: SessionType::Video, offered: false },
    SlotDefinition { id: "7", time: "05:00 PM", counselor: "Dr. Mike Rodriguez", session_type: SessionType::Video, offered: true },
];

pub fn find_slot(slot_id: &str) -> Option<&'static SlotDefinition> {
    DAILY_SLOTS.iter().find(|s| s.id == slot_id)
}

/// A slot as shown on the booking page for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SlotAvailability {
    pub id: String,
    pub time: String,
    pub counselor: String,
    pub session_type: SessionType,
    pub available: bool,
}

/// Daily slots for a date. `claimed` holds the ids already booked that day.
pub fn slots_for_day(claimed: &[String]) -> Vec<SlotAvailability> {
    DAILY_SLOTS
        .iter()
        .map(|s| SlotAvailability {
            id: s.id.to_string(),
            time: s.time.to_string(),
            counselor: s.counselor.to_string(),
            session_type: s.session_type,
            available: s.offered && !claimed.iter().any(|c| c == s.id),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BookingRequest {
    pub date: jiff::civil::Date,
    pub slot_id: String,
    #[serde(default)]
    pub mode: SessionMode,
}

impl BookingRequest {
    /// Check the request against the slot table and build a confirmed booking.
    ///
    /// This does not reserve the slot; callers must claim it atomically in
    /// storage before persisting the booking.
    pub fn confirm(
        &self,
        claimed: &[String],
        today: jiff::civil::Date,
        now: jiff::Timestamp,
    ) -> Result<Booking, CoreError> {
        if self.date < today {
            return Err(CoreError::BookingInPast(self.date));
        }
        let slot =
            find_slot(&self.slot_id).ok_or_else(|| CoreError::UnknownSlot(self.slot_id.clone()))?;
        if !slot.offered || claimed.iter().any(|c| c == slot.id) {
            return Err(CoreError::SlotUnavailable {
                date: self.date,
                slot_id: self.slot_id.clone(),
            });
        }

        Ok(Booking {
            id: Uuid::new_v4(),
            date: self.date,
            slot_id: slot.id.to_string(),
            time: slot.time.to_string(),
            counselor: slot.counselor.to_string(),
            session_type: slot.session_type,
            mode: self.mode,
            status: BookingStatus::Confirmed,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Booking {
    pub id: Uuid,
    pub date: jiff::civil::Date,
    pub slot_id: String,
    pub time: String,
    pub counselor: String,
    pub session_type: SessionType,
    pub mode: SessionMode,
    pub status: BookingStatus,
    pub created_at: jiff::Timestamp,
}

/// Marker holding a `(date, slot)` pair for one booking.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SlotClaim {
    pub booking_id: Uuid,
    pub claimed_at: jiff::Timestamp,
}

impl Booking {
    pub fn claim(&self) -> SlotClaim {
        SlotClaim {
            booking_id: self.id,
            claimed_at: self.created_at,
        }
    }
}
