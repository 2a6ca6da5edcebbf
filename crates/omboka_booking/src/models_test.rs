#[cfg(test)]
mod tests {
    use crate::models::{parse_portal_timestamp, QueryWindow, SlotStatus};
    use chrono::{Months, NaiveDate};

    #[test]
    fn test_parse_timestamp_without_seconds() {
        let parsed = parse_portal_timestamp("2024-05-01T09:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_timestamp_with_seconds() {
        let parsed = parse_portal_timestamp("2024-06-15T10:00:30").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 30)
            .unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_portal_timestamp("not a date").is_err());
        assert!(parse_portal_timestamp("2024-05-01").is_err());
        assert!(parse_portal_timestamp("").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SlotStatus::from_label("ledig"), SlotStatus::Free);
        assert_eq!(SlotStatus::from_label("bokad"), SlotStatus::Booked);
        assert_eq!(SlotStatus::from_label("upptagen"), SlotStatus::Booked);
        // Labels we have never seen must not look bookable
        assert_eq!(SlotStatus::from_label("stangd"), SlotStatus::Unavailable);
        assert_eq!(SlotStatus::from_label(""), SlotStatus::Unavailable);
    }

    #[test]
    fn test_default_window_spans_four_months() {
        let window = QueryWindow::default();
        assert!(window.start < window.end);
        assert_eq!(
            window.end,
            window.start.checked_add_months(Months::new(4)).unwrap()
        );
    }

    #[test]
    fn test_months_ahead_honours_requested_span() {
        let window = QueryWindow::months_ahead(2);
        assert_eq!(
            window.end,
            window.start.checked_add_months(Months::new(2)).unwrap()
        );
    }
}
