//! 종가 제공자 통합 테스트
//!
//! - Yahoo chart API 응답을 mockito 서버로 재현
//! - CSV 저장 후 CsvPriceProvider로 다시 읽기

use std::time::Duration;

use chrono::NaiveDate;
use dca_core::{PricePoint, PriceSeries};
use dca_data::{
    save_series_csv, CsvPriceProvider, DataError, PriceProvider, YahooChartProvider,
};
use mockito::Matcher;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const SPY_BODY: &str = r#"{"chart":{"result":[{
    "meta":{"symbol":"SPY","gmtoffset":-18000},
    "timestamp":[1704205800,1704292200],
    "indicators":{"quote":[{"close":[472.65,468.79]}]}
}],"error":null}}"#;

#[tokio::test]
async fn test_yahoo_provider_fetches_closes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/SPY".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SPY_BODY)
        .create_async()
        .await;

    let provider =
        YahooChartProvider::new(server.url(), Duration::from_secs(5), "dca-test").unwrap();
    let series = provider
        .fetch_daily_closes("SPY", d(2024, 1, 1), d(2024, 1, 5))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(series.ticker(), "SPY");
    assert_eq!(series.len(), 2);
    assert_eq!(series.first_date(), Some(d(2024, 1, 2)));
    assert_eq!(series.points()[1].close, Some(dec!(468.79)));
}

#[tokio::test]
async fn test_yahoo_provider_unknown_ticker() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/NOPE".to_string()))
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#)
        .create_async()
        .await;

    let provider =
        YahooChartProvider::new(server.url(), Duration::from_secs(5), "dca-test").unwrap();
    let result = provider
        .fetch_daily_closes("NOPE", d(2024, 1, 1), d(2024, 1, 5))
        .await;

    assert!(matches!(result, Err(DataError::NotFound(_))));
}

#[tokio::test]
async fn test_yahoo_provider_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/v8/finance/chart/SPY".to_string()))
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let provider =
        YahooChartProvider::new(server.url(), Duration::from_secs(5), "dca-test").unwrap();
    let result = provider
        .fetch_daily_closes("SPY", d(2024, 1, 1), d(2024, 1, 5))
        .await;

    assert!(matches!(result, Err(DataError::FetchError(_))));
}

#[tokio::test]
async fn test_csv_roundtrip_through_provider() {
    let dir = std::env::temp_dir().join(format!("dca-csv-test-{}", std::process::id()));
    let series = PriceSeries::new(
        "VOO",
        vec![
            PricePoint::new(d(2024, 1, 2), dec!(400.5)),
            PricePoint::missing(d(2024, 1, 3)),
            PricePoint::new(d(2024, 1, 4), dec!(402)),
            PricePoint::new(d(2024, 2, 1), dec!(410)),
        ],
    )
    .unwrap();

    let provider = CsvPriceProvider::new(&dir);
    let written = save_series_csv(provider.path_for("VOO").unwrap(), &series).unwrap();
    assert_eq!(written, 4);

    let loaded = provider
        .fetch_daily_closes("voo", d(2024, 1, 1), d(2024, 1, 31))
        .await
        .unwrap();

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.points()[0].close, Some(dec!(400.5)));
    assert_eq!(loaded.points()[1].close, None);
    assert_eq!(loaded.missing_count(), 1);

    let missing = provider
        .fetch_daily_closes("NOFILE", d(2024, 1, 1), d(2024, 1, 31))
        .await;
    assert!(matches!(missing, Err(DataError::NotFound(_))));

    let _ = std::fs::remove_dir_all(&dir);
}
