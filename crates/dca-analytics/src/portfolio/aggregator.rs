//! 종목별 원장을 하나의 포트폴리오 원장으로 합칩니다.
//!
//! 모든 종목 날짜의 합집합을 공통 인덱스로 사용하고, 어떤 종목에 없는
//! 날짜는 그 종목의 투자액과 평가 금액을 0으로 봅니다. 마지막 평가 금액을
//! 이어 붙이지 않으므로 상장 시점이 다른 종목이 섞이면 합산 평가 금액이
//! 일시적으로 낮아질 수 있습니다.
//!
//! 종목은 항상 티커 순으로 순회하므로 입력 순서와 무관하게 같은 결과가 나옵니다.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use dca_core::{
    roi, Amount, DcaError, Ledger, PeakTracker, PortfolioLedger, PortfolioRow, PortfolioSummary,
    TickerSummary,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 포트폴리오 합계 단계의 에러에 쓰이는 이름.
const PORTFOLIO_LABEL: &str = "포트폴리오";

fn overflow_at(ticker: &str, date: NaiveDate) -> DcaError {
    DcaError::ArithmeticOverflow {
        ticker: ticker.to_string(),
        date,
    }
}

/// 공통 인덱스에 맞춘 한 종목의 하루 값.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignedEntry {
    /// 해당 일의 투자액
    pub investment: Amount,
    /// 해당 일의 평가 금액
    pub value: Amount,
}

/// 집계 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// 날짜별 포트폴리오 원장
    pub ledger: PortfolioLedger,
    /// 종목별 요약 (티커 순)
    pub tickers: Vec<TickerSummary>,
    /// 포트폴리오 요약
    pub summary: PortfolioSummary,
}

/// 모든 원장 날짜의 합집합을 오름차순으로 반환합니다.
pub fn union_index(ledgers: &BTreeMap<String, Ledger>) -> Vec<NaiveDate> {
    ledgers
        .values()
        .flat_map(|ledger| ledger.rows().iter().map(|row| row.date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 원장을 공통 인덱스에 맞춥니다. 원장에 없는 날짜는 0으로 채워집니다.
pub fn reindex_zero_filled(ledger: &Ledger, index: &[NaiveDate]) -> Vec<AlignedEntry> {
    index
        .iter()
        .map(|date| {
            ledger
                .row_at(*date)
                .map(|row| AlignedEntry {
                    investment: row.investment,
                    value: row.value,
                })
                .unwrap_or_default()
        })
        .collect()
}

/// 종목별 원장을 포트폴리오로 집계합니다.
///
/// # Errors
///
/// - 원장이 하나도 없으면 [`DcaError::NoData`]
/// - 합계가 `Decimal` 범위를 넘으면 [`DcaError::ArithmeticOverflow`]
pub fn aggregate(ledgers: &BTreeMap<String, Ledger>) -> Result<Portfolio, DcaError> {
    if ledgers.is_empty() {
        return Err(DcaError::NoData);
    }

    let index = union_index(ledgers);
    let mut daily_investment = vec![Decimal::ZERO; index.len()];
    let mut value = vec![Decimal::ZERO; index.len()];

    for ledger in ledgers.values() {
        for (i, entry) in reindex_zero_filled(ledger, &index).into_iter().enumerate() {
            let overflow = || overflow_at(ledger.ticker(), index[i]);
            daily_investment[i] = daily_investment[i]
                .checked_add(entry.investment)
                .ok_or_else(overflow)?;
            value[i] = value[i].checked_add(entry.value).ok_or_else(overflow)?;
        }
    }

    let mut cumulative_investment = Decimal::ZERO;
    let mut peak = PeakTracker::new();
    let mut rows = Vec::with_capacity(index.len());

    for (date, (daily_investment, value)) in index
        .iter()
        .copied()
        .zip(daily_investment.into_iter().zip(value))
    {
        cumulative_investment = cumulative_investment
            .checked_add(daily_investment)
            .ok_or_else(|| overflow_at(PORTFOLIO_LABEL, date))?;
        let (running_peak, drawdown) = peak.update(value);
        rows.push(PortfolioRow {
            date,
            daily_investment,
            cumulative_investment,
            value,
            running_peak,
            drawdown,
        });
    }

    let ledger = PortfolioLedger::new(rows);
    let (total_invested, final_value) = ledger
        .last()
        .map(|row| (row.cumulative_investment, row.value))
        .unwrap_or_default();
    let (max_drawdown, max_drawdown_date) = ledger.max_drawdown();

    let summary = PortfolioSummary {
        total_invested,
        final_value,
        roi: roi(final_value, total_invested),
        max_drawdown,
        max_drawdown_date,
        tickers: ledgers.len(),
    };

    debug!(
        tickers = ledgers.len(),
        rows = ledger.len(),
        total_invested = %summary.total_invested,
        final_value = %summary.final_value,
        "포트폴리오 집계 완료"
    );

    Ok(Portfolio {
        ledger,
        tickers: ledgers.values().map(Ledger::summary).collect(),
        summary,
    })
}
