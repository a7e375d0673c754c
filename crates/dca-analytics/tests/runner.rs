//! 실행기 통합 테스트.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dca_analytics::{RunnerConfig, SimulationRequest, SimulationRunner};
use dca_core::{Cadence, DcaError, PriceSeries, SimulationParams};
use dca_data::StaticPriceProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(ticker: &str) -> PriceSeries {
    PriceSeries::from_closes(
        ticker,
        vec![
            (d(2024, 1, 2), dec!(10)),
            (d(2024, 1, 3), dec!(11)),
            (d(2024, 2, 1), dec!(12)),
        ],
    )
    .unwrap()
}

fn request(tickers: &str) -> SimulationRequest {
    let params =
        SimulationParams::new(d(2024, 1, 1), d(2024, 3, 31), dec!(100), Cadence::Monthly).unwrap();
    SimulationRequest::new(tickers, params).unwrap()
}

#[tokio::test]
async fn partial_failure_keeps_successful_tickers() {
    let provider = StaticPriceProvider::new()
        .with_series(series("SPY"))
        .with_error("QQQ", "connection reset");
    let runner = SimulationRunner::new(Arc::new(provider), RunnerConfig::default());

    let report = runner.run(&request("spy, qqq, nope")).await.unwrap();

    assert!(report.is_partial());
    assert_eq!(report.succeeded(), vec!["SPY"]);
    let failed: Vec<&str> = report.failures.iter().map(|f| f.ticker.as_str()).collect();
    assert_eq!(failed, vec!["QQQ", "NOPE"]);
    assert!(report.failures[0].reason.contains("connection reset"));

    assert_eq!(report.portfolio.summary.tickers, 1);
    assert_eq!(report.portfolio.summary.total_invested, dec!(200));
    assert_eq!(report.portfolio.ledger.len(), 3);
}

#[tokio::test]
async fn multiple_tickers_aggregate() {
    let provider = StaticPriceProvider::new()
        .with_series(series("SPY"))
        .with_series(series("AAPL"));
    let runner = SimulationRunner::new(Arc::new(provider), RunnerConfig::default());

    let report = runner.run(&request("SPY, AAPL")).await.unwrap();

    assert!(!report.is_partial());
    assert_eq!(report.succeeded(), vec!["AAPL", "SPY"]);
    assert_eq!(report.portfolio.summary.total_invested, dec!(400));
    assert_eq!(
        report.portfolio.summary.final_value,
        report.ledgers.values().map(|l| l.final_value()).sum::<Decimal>()
    );
}

#[tokio::test(start_paused = true)]
async fn slow_ticker_times_out_without_blocking_others() {
    let provider = StaticPriceProvider::new()
        .with_series(series("SPY"))
        .with_series(series("SLOW"))
        .with_delay("SLOW", Duration::from_secs(120));
    let config = RunnerConfig {
        max_concurrent_requests: 2,
        request_timeout: Duration::from_secs(5),
    };
    let runner = SimulationRunner::new(Arc::new(provider), config);

    let report = runner.run(&request("SPY, SLOW")).await.unwrap();

    assert_eq!(report.succeeded(), vec!["SPY"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].ticker, "SLOW");
}

#[tokio::test]
async fn range_without_prices_is_a_ticker_failure() {
    let provider = StaticPriceProvider::new()
        .with_series(series("SPY"))
        .with_series(
            PriceSeries::from_closes("OLD", vec![(d(2020, 1, 2), dec!(5))]).unwrap(),
        );
    let runner = SimulationRunner::new(Arc::new(provider), RunnerConfig::default());

    let report = runner.run(&request("SPY,OLD")).await.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].ticker, "OLD");
}

#[tokio::test]
async fn unknown_tickers_only_is_fatal() {
    let runner = SimulationRunner::new(
        Arc::new(StaticPriceProvider::new()),
        RunnerConfig::default(),
    );

    let err = runner.run(&request("XXX")).await.unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.failures().len(), 1);
    assert!(matches!(err, DcaError::AllTickersFailed { .. }));
}
