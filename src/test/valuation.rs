#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        api::{PriceMap, StaticPrices},
        app::Valuator,
        config::ValuationConfig,
        error::ValuationError,
        models::Position,
    };

    fn position(symbol: &str, quantity: Decimal, average_cost: Decimal) -> Position {
        Position::new("owner-a", symbol, quantity, average_cost).unwrap()
    }

    fn prices(entries: &[(&str, Decimal)]) -> PriceMap {
        entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect()
    }

    fn set_sample_data() -> (Vec<Position>, PriceMap) {
        let positions = vec![
            position("AAPL", dec!(10), dec!(150)),
            position("ZZZZ", dec!(5), dec!(10)),
        ];
        (positions, prices(&[("AAPL", dec!(180))]))
    }

    #[tokio::test]
    async fn unpriced_symbols_are_reported_but_not_summed() {
        let (positions, prices) = set_sample_data();
        let snapshot = Valuator::default()
            .valuate(&positions, &StaticPrices::new(prices))
            .await
            .unwrap();

        let aapl = &snapshot.positions()[0];
        assert!(aapl.is_priced());
        assert_eq!(*aapl.current_value(), Some(dec!(1800)));
        assert_eq!(*aapl.unrealized_pnl(), Some(dec!(300)));
        assert_eq!(*aapl.unrealized_pnl_percent(), Some(dec!(20)));

        let zzzz = &snapshot.positions()[1];
        assert!(!zzzz.is_priced());
        assert_eq!(*zzzz.current_price(), None);
        assert_eq!(*zzzz.current_value(), None);

        assert_eq!(*snapshot.total_value(), dec!(1800));
        assert_eq!(*snapshot.total_cost_basis(), dec!(1500));
        assert_eq!(*snapshot.total_unrealized_pnl(), dec!(300));
        assert_eq!(*snapshot.total_unrealized_pnl_percent(), Some(dec!(20)));
        assert_eq!(*snapshot.unpriced_count(), 1);
    }

    #[tokio::test]
    async fn strict_pricing_rejects_gaps() {
        let (positions, prices) = set_sample_data();
        let result = Valuator::new(ValuationConfig::strict())
            .valuate(&positions, &prices)
            .await;

        match result {
            Err(ValuationError::IncompletePricing { missing }) => {
                assert_eq!(missing, vec!["ZZZZ".to_string()]);
            }
            other => panic!("expected IncompletePricing, got {:?}", other),
        }
    }

    #[test]
    fn zero_cost_gift_has_undefined_percent() {
        let positions = vec![position("GIFT", dec!(100), Decimal::ZERO)];
        let snapshot = Valuator::default()
            .valuate_with_prices(&positions, &prices(&[("GIFT", dec!(5))]))
            .unwrap();

        let gift = &snapshot.positions()[0];
        assert_eq!(*gift.current_value(), Some(dec!(500)));
        assert_eq!(*gift.unrealized_pnl(), Some(dec!(500)));
        assert_eq!(*gift.unrealized_pnl_percent(), None);
        assert_eq!(*snapshot.total_unrealized_pnl_percent(), None);
    }

    #[test]
    fn zero_quantity_is_worth_nothing() {
        let positions = vec![
            position("AAPL", Decimal::ZERO, dec!(150)),
            position("MSFT", dec!(2), dec!(300)),
        ];
        let snapshot = Valuator::default()
            .valuate_with_prices(
                &positions,
                &prices(&[("AAPL", dec!(999)), ("MSFT", dec!(400))]),
            )
            .unwrap();

        let aapl = &snapshot.positions()[0];
        assert_eq!(*aapl.current_value(), Some(Decimal::ZERO));
        assert_eq!(snapshot.allocation_weight(aapl), Decimal::ZERO);

        let weights = Valuator::allocation_weights(&snapshot);
        assert_eq!(weights["AAPL"], Decimal::ZERO);
        assert_eq!(weights["MSFT"], dec!(1));
    }

    #[test]
    fn allocation_weights_sum_to_one() {
        let positions = vec![
            position("AAPL", dec!(3), dec!(150)),
            position("MSFT", dec!(7), dec!(300)),
            position("NVDA", dec!(11), dec!(400)),
            position("ZZZZ", dec!(5), dec!(10)),
        ];
        let snapshot = Valuator::default()
            .valuate_with_prices(
                &positions,
                &prices(&[
                    ("AAPL", dec!(181.37)),
                    ("MSFT", dec!(415.23)),
                    ("NVDA", dec!(875.30)),
                ]),
            )
            .unwrap();

        let weights = Valuator::allocation_weights(&snapshot);
        let total: Decimal = weights.values().sum();

        assert!((total - dec!(1)).abs() <= dec!(0.000000001));
        assert_eq!(weights["ZZZZ"], Decimal::ZERO);
    }

    #[test]
    fn allocation_weights_empty_when_worthless() {
        let positions = vec![position("AAPL", dec!(10), dec!(150))];
        let snapshot = Valuator::default()
            .valuate_with_prices(&positions, &PriceMap::new())
            .unwrap();

        assert_eq!(*snapshot.total_value(), Decimal::ZERO);
        assert!(Valuator::allocation_weights(&snapshot).is_empty());
    }

    #[test]
    fn duplicate_symbols_share_one_weight() {
        let positions = vec![
            position("AAPL", dec!(1), dec!(100)),
            position("AAPL", dec!(1), dec!(120)),
            position("MSFT", dec!(2), dec!(300)),
        ];
        let snapshot = Valuator::default()
            .valuate_with_prices(
                &positions,
                &prices(&[("AAPL", dec!(100)), ("MSFT", dec!(100))]),
            )
            .unwrap();

        let weights = Valuator::allocation_weights(&snapshot);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights["AAPL"], dec!(0.5));
        assert_eq!(weights["MSFT"], dec!(0.5));
    }

    #[tokio::test]
    async fn valuate_is_repeatable() {
        let (positions, prices) = set_sample_data();
        let valuator = Valuator::default();

        let first = valuator.valuate(&positions, &prices).await.unwrap();
        let second = valuator.valuate(&positions, &prices).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn negative_price_is_rejected() {
        let positions = vec![position("AAPL", dec!(1), dec!(100))];
        let result = Valuator::default()
            .valuate_with_prices(&positions, &prices(&[("AAPL", dec!(-1))]));

        assert!(matches!(result, Err(ValuationError::InvalidPrice { .. })));
    }

    #[test]
    fn empty_portfolio_has_zero_totals() {
        let snapshot = Valuator::default()
            .valuate_with_prices(&[], &PriceMap::new())
            .unwrap();

        assert!(snapshot.positions().is_empty());
        assert_eq!(*snapshot.total_value(), Decimal::ZERO);
        assert_eq!(*snapshot.total_unrealized_pnl_percent(), None);
    }

    #[test]
    fn day_change_covers_positions_with_previous_close() {
        let positions = vec![
            position("AAPL", dec!(10), dec!(150)),
            position("MSFT", dec!(2), dec!(300)),
        ];
        let snapshot = Valuator::default()
            .valuate_with_prices(
                &positions,
                &prices(&[("AAPL", dec!(180)), ("MSFT", dec!(400))]),
            )
            .unwrap();

        let change =
            Valuator::day_change(&snapshot, &prices(&[("AAPL", dec!(160))])).unwrap();

        assert_eq!(*change.change(), dec!(200));
        assert_eq!(*change.change_percent(), Some(dec!(12.5)));
        assert_eq!(*change.covered_positions(), 1);

        let none = Valuator::day_change(&snapshot, &PriceMap::new()).unwrap();
        assert_eq!(*none.change(), Decimal::ZERO);
        assert_eq!(*none.change_percent(), None);
    }

    #[test]
    fn tiny_cost_basis_overflow_is_reported() {
        let positions = vec![position("DUST", dec!(1), Decimal::new(1, 28))];
        let result = Valuator::default()
            .valuate_with_prices(&positions, &prices(&[("DUST", dec!(10000000000))]));

        assert!(matches!(result, Err(ValuationError::Overflow(_))));
    }

    #[test]
    fn day_change_rejects_negative_previous_close() {
        let positions = vec![position("AAPL", dec!(10), dec!(150))];
        let snapshot = Valuator::default()
            .valuate_with_prices(&positions, &prices(&[("AAPL", dec!(180))]))
            .unwrap();

        let result = Valuator::day_change(&snapshot, &prices(&[("AAPL", dec!(-160))]));

        match result {
            Err(ValuationError::InvalidPrice { symbol, price }) => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(price, dec!(-160));
            }
            other => panic!("expected InvalidPrice, got {:?}", other),
        }
    }
}
