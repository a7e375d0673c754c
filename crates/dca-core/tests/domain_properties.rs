//! 도메인 타입 성질 테스트.

use chrono::{Days, NaiveDate};
use dca_core::{
    parse_tickers, Cadence, ContributionAnchor, PricePoint, PriceSeries, TickerSummary,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 4).unwrap()
}

/// `None`은 결측 종가
fn build_series(closes: &[Option<i64>]) -> PriceSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let date = base_date() + Days::new(i as u64);
            match close {
                Some(cents) => PricePoint::new(date, Decimal::new(*cents, 2)),
                None => PricePoint::missing(date),
            }
        })
        .collect();
    PriceSeries::new("TEST", points).unwrap()
}

proptest! {
    #[test]
    fn forward_fill_never_invents_leading_prices(
        closes in prop::collection::vec(prop::option::of(1i64..100_000), 0..60),
    ) {
        let series = build_series(&closes);
        let filled = series.forward_filled();

        let leading_missing = closes.iter().take_while(|c| c.is_none()).count();
        prop_assert_eq!(filled.len(), closes.len() - leading_missing);

        for (i, (date, price)) in filled.iter().enumerate() {
            let index = leading_missing + i;
            prop_assert_eq!(*date, base_date() + Days::new(index as u64));

            let last_known = closes[..=index].iter().rev().find_map(|c| *c).unwrap();
            prop_assert_eq!(*price, Decimal::new(last_known, 2));
        }
    }

    #[test]
    fn parsed_tickers_are_normalized_and_unique(
        raw in prop::collection::vec("[a-zA-Z]{1,5}", 1..8),
        padding in " {0,3}",
    ) {
        let input = raw
            .iter()
            .map(|t| format!("{}{}{}", padding, t, padding))
            .collect::<Vec<_>>()
            .join(",");

        let tickers = parse_tickers(&input).unwrap();

        for t in &tickers {
            prop_assert_eq!(t, &t.trim().to_uppercase());
        }
        let mut unique = tickers.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), tickers.len());
        prop_assert_eq!(&tickers[0], &raw[0].to_uppercase());
    }

    #[test]
    fn cadence_display_round_trips(code in prop::sample::select(vec![
        "B", "M", "W-MON", "W-TUE", "W-WED", "W-THU", "W-FRI", "W-SAT", "W-SUN",
    ])) {
        let cadence: Cadence = code.parse().unwrap();
        prop_assert_eq!(cadence.to_string(), code);
    }
}

#[test]
fn anchor_serializes_kebab_case() {
    let json = serde_json::to_string(&ContributionAnchor::PeriodEnd).unwrap();
    assert_eq!(json, "\"period-end\"");

    let anchor: ContributionAnchor = serde_json::from_str("\"first-observed\"").unwrap();
    assert_eq!(anchor, ContributionAnchor::FirstObserved);
}

#[test]
fn ticker_summary_serializes_decimals_as_strings() {
    let summary = TickerSummary {
        ticker: "SPY".to_string(),
        total_invested: dec!(1000),
        final_value: dec!(1050.5),
        roi: dec!(0.0505),
        max_drawdown: dec!(-0.1),
        contributions: 2,
        first_date: base_date(),
        last_date: base_date(),
    };

    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["ticker"], "SPY");
    assert_eq!(value["final_value"], "1050.5");
    assert_eq!(value["contributions"], 2);
    assert_eq!(value["first_date"], "2021-01-04");
}
