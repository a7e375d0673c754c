//! 과거 일별 종가 데이터 제공.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종가 데이터 제공자 추상화 (`PriceProvider`)
//! - Yahoo Finance chart API 제공자
//! - 로컬 CSV 디렉토리 제공자
//! - 테스트용 메모리 제공자

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{
    provider_from_config, save_series_csv, CsvPriceProvider, PriceProvider, StaticPriceProvider,
    YahooChartProvider,
};
