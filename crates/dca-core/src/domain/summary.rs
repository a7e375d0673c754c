//! 요약 통계.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Amount, DecimalExt, Ratio};

/// 투자 수익률을 계산합니다.
///
/// `final_value / total_invested - 1`. 총 투자금이 0이면 에러가 아니라 0입니다.
pub fn roi(final_value: Amount, total_invested: Amount) -> Ratio {
    if total_invested.is_zero() {
        return Decimal::ZERO;
    }
    final_value.div_or_zero(total_invested) - Decimal::ONE
}

/// 종목별 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    /// 티커
    pub ticker: String,
    /// 총 투자 금액
    pub total_invested: Amount,
    /// 마지막 거래일의 평가 금액
    pub final_value: Amount,
    /// 수익률 (0.1 = 10%)
    pub roi: Ratio,
    /// 최대 낙폭 (0 이하)
    pub max_drawdown: Ratio,
    /// 투자 횟수
    pub contributions: usize,
    /// 첫 거래일
    pub first_date: NaiveDate,
    /// 마지막 거래일
    pub last_date: NaiveDate,
}

/// 포트폴리오 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// 총 투자 금액 (마지막 날짜의 누적 투자금)
    pub total_invested: Amount,
    /// 마지막 날짜의 평가 금액
    pub final_value: Amount,
    /// 수익률
    pub roi: Ratio,
    /// 전체 기간 최대 낙폭 (0 이하)
    pub max_drawdown: Ratio,
    /// 최대 낙폭 발생일
    pub max_drawdown_date: Option<NaiveDate>,
    /// 집계에 포함된 종목 수
    pub tickers: usize,
}

impl PortfolioSummary {
    /// 평가 손익.
    pub fn profit(&self) -> Amount {
        self.final_value - self.total_invested
    }
}
