//! 종목별 원장.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::summary::{roi, TickerSummary};
use crate::types::{Amount, Price, Ratio, Shares};

/// 원장의 하루치 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// 거래일
    pub date: NaiveDate,
    /// 적용된 종가 (누락 시 직전 종가)
    pub price: Price,
    /// 투자일 여부
    pub contribution: bool,
    /// 당일 투자 금액
    pub investment: Amount,
    /// 당일 매수 주식 수
    pub shares_purchased: Shares,
    /// 누적 보유 주식 수
    pub total_shares: Shares,
    /// 평가 금액 (누적 주식 수 × 종가)
    pub value: Amount,
    /// 평가 금액의 누적 고점
    pub running_peak: Amount,
    /// 고점 대비 낙폭 (0 이하)
    pub drawdown: Ratio,
    /// 누적 투자 금액
    pub cumulative_investment: Amount,
}

/// 한 종목의 적립식 투자 원장.
///
/// 시계열에 존재하는 날짜마다 한 행이 있으며, 항상 한 행 이상입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLedger")]
pub struct Ledger {
    ticker: String,
    rows: Vec<LedgerRow>,
}

/// 역직렬화 직후 검증 전의 원장.
#[derive(Deserialize)]
struct RawLedger {
    ticker: String,
    rows: Vec<LedgerRow>,
}

impl TryFrom<RawLedger> for Ledger {
    type Error = String;

    fn try_from(raw: RawLedger) -> Result<Self, Self::Error> {
        let ticker = raw.ticker;
        Ledger::new(ticker.clone(), raw.rows).ok_or_else(|| format!("{ticker} 원장에 행이 없습니다"))
    }
}

impl Ledger {
    /// 새 원장을 생성합니다. 행이 없으면 `None`입니다.
    pub fn new(ticker: impl Into<String>, rows: Vec<LedgerRow>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        Some(Self {
            ticker: ticker.into(),
            rows,
        })
    }

    /// 티커.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// 모든 행.
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    /// 행 수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 원장은 생성 시점에 비어있을 수 없습니다.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 첫 거래일.
    pub fn first_date(&self) -> NaiveDate {
        self.rows[0].date
    }

    /// 마지막 거래일.
    pub fn last_date(&self) -> NaiveDate {
        self.last_row().date
    }

    /// 마지막 행.
    pub fn last_row(&self) -> &LedgerRow {
        &self.rows[self.rows.len() - 1]
    }

    /// 총 투자 금액.
    pub fn total_invested(&self) -> Amount {
        self.rows.iter().map(|r| r.investment).sum()
    }

    /// 마지막 거래일의 평가 금액.
    pub fn final_value(&self) -> Amount {
        self.last_row().value
    }

    /// 최대 낙폭 (0 이하).
    pub fn max_drawdown(&self) -> Ratio {
        self.rows
            .iter()
            .map(|r| r.drawdown)
            .min()
            .unwrap_or(Decimal::ZERO)
    }

    /// 투자 횟수.
    pub fn contribution_count(&self) -> usize {
        self.rows.iter().filter(|r| r.contribution).count()
    }

    /// 날짜로 행을 찾습니다.
    pub fn row_at(&self, date: NaiveDate) -> Option<&LedgerRow> {
        self.rows
            .binary_search_by(|r| r.date.cmp(&date))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// 종목 요약을 계산합니다.
    pub fn summary(&self) -> TickerSummary {
        let total_invested = self.total_invested();
        let final_value = self.final_value();

        TickerSummary {
            ticker: self.ticker.clone(),
            total_invested,
            final_value,
            roi: roi(final_value, total_invested),
            max_drawdown: self.max_drawdown(),
            contributions: self.contribution_count(),
            first_date: self.first_date(),
            last_date: self.last_date(),
        }
    }
}
