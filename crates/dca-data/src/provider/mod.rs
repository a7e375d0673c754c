//! 종가 데이터 Provider 모듈.
//!
//! ## Provider
//! - `YahooChartProvider`: Yahoo Finance chart API (조정 종가 우선)
//! - `CsvPriceProvider`: `{data_dir}/{TICKER}.csv` 파일
//! - `StaticPriceProvider`: 메모리 내 시계열 (테스트/데모용)

pub mod csv;
pub mod memory;
pub mod yahoo;

pub use csv::{save_series_csv, CsvPriceProvider};
pub use memory::StaticPriceProvider;
pub use yahoo::YahooChartProvider;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use dca_core::{DataConfig, DataSource, PriceSeries};

use crate::error::Result;

/// 일별 종가 데이터 제공자 trait.
///
/// 구현체는 요청한 구간 `[start, end]`(양 끝 포함)의 일별 종가를 반환합니다.
/// 데이터가 없는 경우 빈 시계열 또는 에러를 반환할 수 있으며, 호출자는
/// 두 경우를 모두 해당 종목의 "데이터 없음"으로 처리합니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct MyProvider;
///
/// #[async_trait]
/// impl PriceProvider for MyProvider {
///     async fn fetch_daily_closes(&self, ticker: &str, start: NaiveDate, end: NaiveDate)
///         -> Result<PriceSeries> {
///         // 외부 소스 호출 및 변환
///     }
///
///     fn name(&self) -> &str {
///         "my-provider"
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 일별 종가 조회.
    ///
    /// # Errors
    ///
    /// - `DataError::NotFound`: 알 수 없는 티커
    /// - `DataError::FetchError`/`Timeout`: 네트워크 실패
    /// - `DataError::ParseError`: 응답 형식 오류
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;

    /// 제공자 이름 (로깅용).
    fn name(&self) -> &str;
}

/// 설정에 맞는 제공자를 생성합니다.
pub fn provider_from_config(config: &DataConfig) -> Result<Arc<dyn PriceProvider>> {
    match config.source {
        DataSource::Yahoo => Ok(Arc::new(YahooChartProvider::from_config(config)?)),
        DataSource::Csv => Ok(Arc::new(CsvPriceProvider::new(&config.data_dir))),
    }
}
