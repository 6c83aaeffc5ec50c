use mindwell_core::error::CoreError;
use mindwell_core::models::booking::{
    BookingRequest, BookingStatus, SessionMode, SessionType, slots_for_day,
};
use mindwell_core::object_keys;

fn date(s: &str) -> jiff::civil::Date {
    s.parse().unwrap()
}

fn now() -> jiff::Timestamp {
    "2025-04-10T09:00:00Z".parse().unwrap()
}

#[test]
fn blocked_and_claimed_slots_are_unavailable() {
    let slots = slots_for_day(&["1".to_string()]);
    assert_eq!(slots.len(), 7);

    let available: Vec<&str> = slots
        .iter()
        .filter(|s| s.available)
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(available, vec!["3", "4", "5", "7"]);
}

#[test]
fn confirm_builds_booking_from_slot_table() {
    let req = BookingRequest {
        date: date("2025-04-12"),
        slot_id: "5".to_string(),
        mode: SessionMode::InPerson,
    };
    let booking = req.confirm(&[], date("2025-04-10"), now()).unwrap();
    assert_eq!(booking.counselor, "Dr. James Wilson");
    assert_eq!(booking.time, "03:00 PM");
    assert_eq!(booking.session_type, SessionType::Phone);
    assert_eq!(booking.mode, SessionMode::InPerson);
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[test]
fn confirm_rejects_unknown_blocked_taken_and_past() {
    let today = date("2025-04-10");
    let mut req = BookingRequest {
        date: today,
        slot_id: "99".to_string(),
        mode: SessionMode::Online,
    };
    assert!(matches!(
        req.confirm(&[], today, now()),
        Err(CoreError::UnknownSlot(_))
    ));

    req.slot_id = "2".to_string();
    assert!(matches!(
        req.confirm(&[], today, now()),
        Err(CoreError::SlotUnavailable { .. })
    ));

    req.slot_id = "3".to_string();
    assert!(matches!(
        req.confirm(&["3".to_string()], today, now()),
        Err(CoreError::SlotUnavailable { .. })
    ));

    req.date = date("2025-04-09");
    assert!(matches!(
        req.confirm(&[], today, now()),
        Err(CoreError::BookingInPast(_))
    ));
}

#[test]
fn mode_defaults_to_online() {
    let req: BookingRequest =
        serde_json::from_str(r#"{"date":"2025-04-11","slot_id":"1"}"#).unwrap();
    assert_eq!(req.mode, SessionMode::Online);
}

#[test]
fn claim_keys_round_trip_to_slot_ids() {
    let key = object_keys::booking_claim(date("2025-03-10"), "3");
    assert_eq!(key, "bookings/claims/2025-03-10/3.json");
    assert!(key.starts_with(&object_keys::booking_claims_prefix(date("2025-03-10"))));
    assert_eq!(object_keys::claimed_slot_id(&key), Some("3"));
    assert_eq!(object_keys::claimed_slot_id("bookings/records/x.json"), None);
}
