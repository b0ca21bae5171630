#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{error::ValuationError, models::Position};

    #[test]
    fn accepts_zero_quantity_and_zero_cost() {
        assert!(Position::new("a", "AAPL", Decimal::ZERO, dec!(150)).is_ok());
        assert!(Position::new("a", "GIFT", dec!(100), Decimal::ZERO).is_ok());
    }

    #[test]
    fn rejects_negative_quantity() {
        let result = Position::new("a", "AAPL", dec!(-1), dec!(150));
        assert!(matches!(result, Err(ValuationError::InvalidPosition(_))));
    }

    #[test]
    fn rejects_negative_cost() {
        let result = Position::new("a", "AAPL", dec!(1), dec!(-150));
        assert!(matches!(result, Err(ValuationError::InvalidPosition(_))));
    }

    #[test]
    fn rejects_blank_symbol() {
        let result = Position::new("a", "  ", dec!(1), dec!(150));
        assert!(matches!(result, Err(ValuationError::InvalidPosition(_))));
    }

    #[test]
    fn superseded_by_leaves_original_untouched() {
        let original = Position::new("a", "MSFT", dec!(10), dec!(300)).unwrap();
        let next = original.superseded_by(dec!(15), dec!(310)).unwrap();

        assert_eq!(*original.quantity(), dec!(10));
        assert_eq!(*next.quantity(), dec!(15));
        assert_eq!(*next.average_cost(), dec!(310));
        assert_eq!(next.symbol(), original.symbol());
        assert!(original.superseded_by(dec!(-1), dec!(310)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: Position = serde_json::from_str(
            r#"{"ownerId":"a","symbol":"AAPL","quantity":10,"averageCost":150,"createdAt":"2024-03-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(*ok.quantity(), dec!(10));
        assert_eq!(
            *ok.created_at(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );

        let bad = serde_json::from_str::<Position>(
            r#"{"ownerId":"a","symbol":"AAPL","quantity":-10,"averageCost":150}"#,
        );
        assert!(bad.is_err());
    }
}
