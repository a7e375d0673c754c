//! 일별 종가 시계열.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DcaError;
use crate::types::Price;

/// 단일 날짜의 종가.
///
/// `close`가 `None`이면 원본 피드에 날짜는 있으나 종가가 누락된 경우입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (누락 시 None)
    pub close: Option<Price>,
}

impl PricePoint {
    /// 종가가 있는 데이터 포인트를 생성합니다.
    pub fn new(date: NaiveDate, close: Price) -> Self {
        Self {
            date,
            close: Some(close),
        }
    }

    /// 종가가 누락된 데이터 포인트를 생성합니다.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, close: None }
    }
}

/// 한 종목의 일별 종가 시계열.
///
/// 날짜는 엄격하게 증가하며 중복이 없습니다. 휴장일은 0이 아니라
/// 아예 존재하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// 새 시계열을 생성합니다.
    ///
    /// 0 이하의 종가는 누락으로 취급합니다.
    ///
    /// # Errors
    ///
    /// 날짜가 엄격하게 증가하지 않으면 `DcaError::InvalidInput`.
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, DcaError> {
        let ticker = ticker.into();

        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(DcaError::InvalidInput(format!(
                "{}: dates must be strictly increasing ({} then {})",
                ticker, pair[0].date, pair[1].date
            )));
        }

        let points = points
            .into_iter()
            .map(|p| PricePoint {
                date: p.date,
                close: p.close.filter(|c| c.is_sign_positive() && !c.is_zero()),
            })
            .collect();

        Ok(Self { ticker, points })
    }

    /// (날짜, 종가) 목록으로 시계열을 생성합니다.
    pub fn from_closes(
        ticker: impl Into<String>,
        closes: Vec<(NaiveDate, Price)>,
    ) -> Result<Self, DcaError> {
        let points = closes
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect();
        Self::new(ticker, points)
    }

    /// 빈 시계열을 생성합니다.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            points: Vec::new(),
        }
    }

    /// 티커를 반환합니다.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// 모든 데이터 포인트를 반환합니다.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// 데이터 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 데이터가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 첫 날짜.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// 마지막 날짜.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// 종가가 누락된 포인트 수.
    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| p.close.is_none()).count()
    }

    /// `[start, end]` 구간(양 끝 포함)으로 제한한 시계열을 반환합니다.
    pub fn restrict(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let from = self.points.partition_point(|p| p.date < start);
        let to = self.points.partition_point(|p| p.date <= end);

        PriceSeries {
            ticker: self.ticker.clone(),
            points: if from < to {
                self.points[from..to].to_vec()
            } else {
                Vec::new()
            },
        }
    }

    /// 누락된 종가를 직전 종가로 채운 (날짜, 종가) 목록을 반환합니다.
    ///
    /// 날짜를 새로 만들지 않습니다. 직전 종가가 없는 선행 누락 구간은
    /// 거래할 가격이 없으므로 제외됩니다.
    pub fn forward_filled(&self) -> Vec<(NaiveDate, Price)> {
        let mut last_close: Option<Price> = None;

        self.points
            .iter()
            .filter_map(|p| {
                if p.close.is_some() {
                    last_close = p.close;
                }
                last_close.map(|close| (p.date, close))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_unsorted_dates() {
        let result = PriceSeries::from_closes(
            "SPY",
            vec![(d(2024, 1, 3), dec!(100)), (d(2024, 1, 2), dec!(101))],
        );
        assert!(matches!(result, Err(DcaError::InvalidInput(_))));

        let duplicate = PriceSeries::from_closes(
            "SPY",
            vec![(d(2024, 1, 2), dec!(100)), (d(2024, 1, 2), dec!(101))],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_restrict_inclusive() {
        let series = PriceSeries::from_closes(
            "SPY",
            vec![
                (d(2024, 1, 2), dec!(100)),
                (d(2024, 1, 3), dec!(101)),
                (d(2024, 1, 4), dec!(102)),
                (d(2024, 1, 5), dec!(103)),
            ],
        )
        .unwrap();

        let restricted = series.restrict(d(2024, 1, 3), d(2024, 1, 4));
        assert_eq!(restricted.len(), 2);
        assert_eq!(restricted.first_date(), Some(d(2024, 1, 3)));
        assert_eq!(restricted.last_date(), Some(d(2024, 1, 4)));

        assert!(series.restrict(d(2023, 1, 1), d(2023, 12, 31)).is_empty());
        assert!(series.restrict(d(2024, 1, 5), d(2024, 1, 4)).is_empty());
    }

    #[test]
    fn test_forward_fill() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::missing(d(2024, 1, 1)),
                PricePoint::new(d(2024, 1, 2), dec!(100)),
                PricePoint::missing(d(2024, 1, 3)),
                PricePoint::new(d(2024, 1, 4), dec!(0)),
                PricePoint::new(d(2024, 1, 5), dec!(105)),
            ],
        )
        .unwrap();

        assert_eq!(series.missing_count(), 3);

        let filled = series.forward_filled();
        assert_eq!(
            filled,
            vec![
                (d(2024, 1, 2), dec!(100)),
                (d(2024, 1, 3), dec!(100)),
                (d(2024, 1, 4), dec!(100)),
                (d(2024, 1, 5), dec!(105)),
            ]
        );
    }
}
