//! 시뮬레이터와 집계기의 성질 기반 테스트.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, Weekday};
use dca_analytics::{aggregate, contribution_dates, simulate};
use dca_core::{Cadence, ContributionAnchor, DecimalExt, Ledger, PriceSeries, SimulationParams};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// (날짜 간격, 센트 단위 가격) 목록을 시계열로 변환
fn build_series(ticker: &str, steps: &[(u64, i64)]) -> PriceSeries {
    let mut date = base_date();
    let closes = steps
        .iter()
        .map(|(gap, cents)| {
            date = date + Days::new(*gap);
            (date, Decimal::new(*cents, 2))
        })
        .collect();
    PriceSeries::from_closes(ticker, closes).unwrap()
}

fn arb_steps() -> impl Strategy<Value = Vec<(u64, i64)>> {
    prop::collection::vec((1u64..5, 100i64..100_000), 1..120)
}

fn arb_cadence() -> impl Strategy<Value = Cadence> {
    prop_oneof![
        Just(Cadence::Daily),
        Just(Cadence::Monthly),
        Just(Cadence::WEEKLY_FRIDAY),
        Just(Cadence::Weekly(Weekday::Mon)),
    ]
}

fn arb_anchor() -> impl Strategy<Value = ContributionAnchor> {
    prop_oneof![
        Just(ContributionAnchor::FirstObserved),
        Just(ContributionAnchor::PeriodEnd),
    ]
}

fn params(amount: i64, cadence: Cadence, anchor: ContributionAnchor) -> SimulationParams {
    SimulationParams::new(
        base_date(),
        NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
        Decimal::from(amount),
        cadence,
    )
    .unwrap()
    .with_anchor(anchor)
}

proptest! {
    #[test]
    fn shares_accumulate_from_purchases(
        steps in arb_steps(),
        amount in 0i64..1_000,
        cadence in arb_cadence(),
        anchor in arb_anchor(),
    ) {
        let ledger = simulate(&build_series("AAA", &steps), &params(amount, cadence, anchor)).unwrap();

        let mut shares = Decimal::ZERO;
        for row in ledger.rows() {
            shares += row.investment.div_or_zero(row.price);
            prop_assert_eq!(row.total_shares, shares, "row {}", row.date);
        }

        for pair in ledger.rows().windows(2) {
            prop_assert!(pair[1].total_shares >= pair[0].total_shares);
            prop_assert!(pair[1].cumulative_investment >= pair[0].cumulative_investment);
        }
    }

    #[test]
    fn cumulative_investment_matches_contribution_count(
        steps in arb_steps(),
        amount in 0i64..1_000,
        cadence in arb_cadence(),
        anchor in arb_anchor(),
    ) {
        let p = params(amount, cadence, anchor);
        let series = build_series("AAA", &steps);
        let ledger = simulate(&series, &p).unwrap();

        let dates: Vec<NaiveDate> = ledger.rows().iter().map(|r| r.date).collect();
        let expected = contribution_dates(&dates, cadence, anchor).len();

        prop_assert_eq!(ledger.contribution_count(), expected);
        prop_assert_eq!(
            ledger.total_invested(),
            Decimal::from(amount) * Decimal::from(expected as u64)
        );
    }

    #[test]
    fn drawdown_is_non_positive_and_zero_at_peaks(
        steps in arb_steps(),
        amount in 0i64..1_000,
        cadence in arb_cadence(),
    ) {
        let p = params(amount, cadence, ContributionAnchor::FirstObserved);
        let ledger = simulate(&build_series("AAA", &steps), &p).unwrap();

        for row in ledger.rows() {
            prop_assert!(row.drawdown <= Decimal::ZERO);
            prop_assert!(row.value <= row.running_peak);
            if row.value == row.running_peak {
                prop_assert_eq!(row.drawdown, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn simulation_is_idempotent(
        steps in arb_steps(),
        amount in 0i64..1_000,
        cadence in arb_cadence(),
        anchor in arb_anchor(),
    ) {
        let p = params(amount, cadence, anchor);
        let series = build_series("AAA", &steps);
        prop_assert_eq!(simulate(&series, &p), simulate(&series, &p));
    }

    #[test]
    fn aggregation_ignores_insertion_order(
        a in arb_steps(),
        b in arb_steps(),
        c in arb_steps(),
        amount in 1i64..1_000,
        cadence in arb_cadence(),
    ) {
        let p = params(amount, cadence, ContributionAnchor::FirstObserved);
        let ledgers: Vec<(String, Ledger)> = [("AAA", &a), ("BBB", &b), ("CCC", &c)]
            .into_iter()
            .map(|(t, steps)| (t.to_string(), simulate(&build_series(t, steps), &p).unwrap()))
            .collect();

        let forward: BTreeMap<_, _> = ledgers.iter().cloned().collect();
        let reverse: BTreeMap<_, _> = ledgers.iter().rev().cloned().collect();

        let left = aggregate(&forward).unwrap();
        let right = aggregate(&reverse).unwrap();
        prop_assert_eq!(&left, &right);

        let invested: Decimal = ledgers.iter().map(|(_, l)| l.total_invested()).sum();
        prop_assert_eq!(left.summary.total_invested, invested);
    }
}
