//! 메모리 내 종가 제공자.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dca_core::PriceSeries;

use super::PriceProvider;
use crate::error::{DataError, Result};

/// 미리 적재한 시계열을 반환하는 제공자.
///
/// 종목별로 에러나 응답 지연을 주입할 수 있습니다.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    series: HashMap<String, PriceSeries>,
    errors: HashMap<String, String>,
    delays: HashMap<String, Duration>,
}

impl StaticPriceProvider {
    /// 빈 제공자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열을 등록합니다. 키는 시계열의 티커입니다.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.series.insert(series.ticker().to_uppercase(), series);
        self
    }

    /// 해당 티커 요청 시 실패하도록 설정합니다.
    pub fn with_error(mut self, ticker: &str, message: impl Into<String>) -> Self {
        self.errors.insert(ticker.to_uppercase(), message.into());
        self
    }

    /// 해당 티커 응답을 지연시킵니다.
    pub fn with_delay(mut self, ticker: &str, delay: Duration) -> Self {
        self.delays.insert(ticker.to_uppercase(), delay);
        self
    }
}

#[async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let key = ticker.to_uppercase();

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(message) = self.errors.get(&key) {
            return Err(DataError::FetchError(message.clone()));
        }

        self.series
            .get(&key)
            .map(|s| s.restrict(start, end))
            .ok_or_else(|| DataError::NotFound(format!("Unknown ticker: {}", ticker)))
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_static_provider_restricts_range() {
        let series = PriceSeries::from_closes(
            "SPY",
            vec![(d(2024, 1, 2), dec!(100)), (d(2024, 2, 1), dec!(110))],
        )
        .unwrap();
        let provider = StaticPriceProvider::new()
            .with_series(series)
            .with_error("BAD", "upstream 500");

        let fetched = provider
            .fetch_daily_closes("spy", d(2024, 1, 1), d(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);

        assert!(matches!(
            provider.fetch_daily_closes("BAD", d(2024, 1, 1), d(2024, 1, 31)).await,
            Err(DataError::FetchError(_))
        ));
        assert!(matches!(
            provider.fetch_daily_closes("NONE", d(2024, 1, 1), d(2024, 1, 31)).await,
            Err(DataError::NotFound(_))
        ));
    }
}
