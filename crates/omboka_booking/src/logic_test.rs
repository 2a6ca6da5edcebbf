#[cfg(test)]
mod tests {
    use crate::error::BookingError;
    use crate::logic::{earlier_slots, parse_calendar_body};
    use crate::models::{CurrentBooking, Slot, SlotStatus};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn booking_on(date: NaiveDateTime) -> CurrentBooking {
        CurrentBooking {
            date,
            place: "Office X".to_string(),
            code: "ABCD-1234".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    fn slot(id: &str, start: NaiveDateTime, status: SlotStatus) -> Slot {
        Slot {
            id: id.to_string(),
            start,
            status,
        }
    }

    #[test]
    fn test_parse_calendar_body_preserves_order_and_status() {
        let body = r#"[
            {"id": "7", "start": "2024-07-01T09:00", "className": ["ledig", "extra"]},
            {"id": "3", "start": "2024-05-01T09:00", "className": ["bokad"]},
            {"id": "9", "start": "2024-06-01T13:30", "className": ["ledig"]}
        ]"#;

        let slots = parse_calendar_body(body).unwrap();

        assert_eq!(slots.len(), 3);
        // Portal order, not chronological order
        assert_eq!(slots[0].id, "7");
        assert_eq!(slots[1].id, "3");
        assert_eq!(slots[2].id, "9");
        assert_eq!(slots[0].status, SlotStatus::Free);
        assert_eq!(slots[1].status, SlotStatus::Booked);
        assert_eq!(slots[2].start, at(2024, 6, 1, 13) + chrono::Duration::minutes(30));
    }

    #[test]
    fn test_parse_calendar_body_empty_list_is_ok() {
        let slots = parse_calendar_body("[]").unwrap();
        assert!(slots.is_empty());
    }

    #[test]
    fn test_parse_calendar_body_missing_class_name_is_unavailable() {
        let body = r#"[{"id": "1", "start": "2024-05-01T09:00"}]"#;
        let slots = parse_calendar_body(body).unwrap();
        assert_eq!(slots[0].status, SlotStatus::Unavailable);
    }

    #[test]
    fn test_technical_error_page_maps_to_portal_internal() {
        let body = "<html><body>A technical error has unfortunately occurred</body></html>";
        let err = parse_calendar_body(body).unwrap_err();
        assert!(
            matches!(err, BookingError::PortalInternal),
            "expected PortalInternal, got {err:?}"
        );
    }

    #[test]
    fn test_other_garbage_maps_to_unexpected_format() {
        let err = parse_calendar_body("<html>maintenance window</html>").unwrap_err();
        assert!(matches!(err, BookingError::UnexpectedFormat(_)));
    }

    #[test]
    fn test_unparseable_slot_start_fails_the_fetch() {
        // A bad timestamp must not be silently dropped -- an empty-looking
        // result may only ever mean "zero slots".
        let body = r#"[{"id": "1", "start": "tomorrow-ish", "className": ["ledig"]}]"#;
        let err = parse_calendar_body(body).unwrap_err();
        assert!(matches!(err, BookingError::UnexpectedFormat(_)));
    }

    #[test]
    fn test_earlier_slots_filters_status_and_time() {
        let booking = booking_on(at(2024, 6, 15, 10));
        let slots = vec![
            slot("1", at(2024, 5, 1, 9), SlotStatus::Free),
            slot("2", at(2024, 7, 1, 9), SlotStatus::Free),
            slot("3", at(2024, 5, 2, 9), SlotStatus::Booked),
            slot("4", at(2024, 5, 3, 9), SlotStatus::Unavailable),
            slot("5", at(2024, 6, 15, 10), SlotStatus::Free),
        ];

        let earlier = earlier_slots(&slots, &booking);

        assert_eq!(earlier.len(), 1);
        assert_eq!(earlier[0].id, "1");
        for found in &earlier {
            assert_eq!(found.status, SlotStatus::Free);
            assert!(found.start < booking.date);
        }
    }

    #[test]
    fn test_earlier_slots_preserves_portal_order() {
        let booking = booking_on(at(2024, 6, 15, 10));
        let slots = vec![
            slot("b", at(2024, 5, 2, 9), SlotStatus::Free),
            slot("a", at(2024, 5, 1, 9), SlotStatus::Free),
        ];

        let earlier = earlier_slots(&slots, &booking);

        let ids: Vec<&str> = earlier.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_earlier_slots_empty_cache_yields_empty() {
        let booking = booking_on(at(2024, 6, 15, 10));
        assert!(earlier_slots(&[], &booking).is_empty());
    }
}
