//! 포트폴리오 원장.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Amount, Ratio};

/// 포트폴리오 원장의 하루치 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRow {
    /// 날짜 (전체 종목 날짜의 합집합)
    pub date: NaiveDate,
    /// 당일 전 종목 투자 합계
    pub daily_investment: Amount,
    /// 누적 투자 금액
    pub cumulative_investment: Amount,
    /// 당일 전 종목 평가 금액 합계
    pub value: Amount,
    /// 평가 금액의 누적 고점 (차트의 낙폭 음영 상단)
    pub running_peak: Amount,
    /// 고점 대비 낙폭 (0 이하)
    pub drawdown: Ratio,
}

/// 전 종목을 합산한 포트폴리오 원장.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioLedger {
    rows: Vec<PortfolioRow>,
}

impl PortfolioLedger {
    /// 새 원장을 생성합니다.
    pub fn new(rows: Vec<PortfolioRow>) -> Self {
        Self { rows }
    }

    /// 모든 행.
    pub fn rows(&self) -> &[PortfolioRow] {
        &self.rows
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 마지막 행.
    pub fn last(&self) -> Option<&PortfolioRow> {
        self.rows.last()
    }

    /// 날짜 인덱스.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// 최대 낙폭과 그 날짜. 동률이면 가장 이른 날짜입니다.
    pub fn max_drawdown(&self) -> (Ratio, Option<NaiveDate>) {
        self.rows
            .iter()
            .fold((Decimal::ZERO, None), |(worst, at), row| {
                if row.drawdown < worst {
                    (row.drawdown, Some(row.date))
                } else {
                    (worst, at)
                }
            })
    }
}
