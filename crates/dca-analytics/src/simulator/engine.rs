//! 단일 종목 적립식 투자 시뮬레이터.
//!
//! 종가 시계열과 매개변수를 받아 일별 원장을 계산합니다.
//! 입력만으로 결과가 결정되며 외부 상태를 읽거나 쓰지 않습니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dca_core::{
    DcaError, Ledger, LedgerRow, PeakTracker, PriceSeries, SimulationParams, TickerFailure,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::schedule::contribution_mask;

/// 범위 내 유효 종가가 없는 종목의 실패 사유.
pub const NO_PRICES_REASON: &str = "해당 기간에 유효한 가격 데이터가 없습니다";

/// 단일 종목 시뮬레이션을 실행합니다.
///
/// 1. 시계열을 `[start, end]` 범위로 자르고 결측 종가를 직전 값으로 채웁니다.
///    첫 유효 종가 이전의 날짜는 거래 가격이 없으므로 제외됩니다.
/// 2. 투자 주기에 따라 투자일을 선택합니다.
/// 3. 날짜순으로 보유 수량, 평가 금액, 누적 최고치, 낙폭을 누적합니다.
///
/// 범위 안에 유효한 종가가 하나도 없거나 계산이 수치 범위를 넘으면
/// `None`을 반환합니다. 실패 사유가 필요하면 [`try_simulate`]를 사용합니다.
pub fn simulate(series: &PriceSeries, params: &SimulationParams) -> Option<Ledger> {
    match try_simulate(series, params) {
        Ok(ledger) => ledger,
        Err(e) => {
            warn!(ticker = %series.ticker(), error = %e, "시뮬레이션 실패");
            None
        }
    }
}

/// [`simulate`]와 같지만 수치 범위 초과를 에러로 돌려줍니다.
///
/// # Errors
///
/// 누적 수량, 평가 금액 또는 누적 투자금이 `Decimal` 범위를 넘으면
/// [`DcaError::ArithmeticOverflow`]를 반환합니다.
pub fn try_simulate(
    series: &PriceSeries,
    params: &SimulationParams,
) -> Result<Option<Ledger>, DcaError> {
    let closes = series
        .restrict(params.start(), params.end())
        .forward_filled();

    if closes.is_empty() {
        debug!(ticker = %series.ticker(), "범위 내 유효 종가 없음");
        return Ok(None);
    }

    let dates: Vec<NaiveDate> = closes.iter().map(|(date, _)| *date).collect();
    let mask = contribution_mask(&dates, params.cadence(), params.anchor());

    let mut total_shares = Decimal::ZERO;
    let mut cumulative_investment = Decimal::ZERO;
    let mut peak = PeakTracker::new();
    let mut rows = Vec::with_capacity(closes.len());

    for ((date, price), contribution) in closes.into_iter().zip(mask) {
        let overflow = || DcaError::ArithmeticOverflow {
            ticker: series.ticker().to_string(),
            date,
        };

        let investment = if contribution {
            params.contribution()
        } else {
            Decimal::ZERO
        };
        let shares_purchased = investment.checked_div(price).ok_or_else(overflow)?;

        total_shares = total_shares
            .checked_add(shares_purchased)
            .ok_or_else(overflow)?;
        cumulative_investment = cumulative_investment
            .checked_add(investment)
            .ok_or_else(overflow)?;

        let value = total_shares.checked_mul(price).ok_or_else(overflow)?;
        let (running_peak, drawdown) = peak.update(value);

        rows.push(LedgerRow {
            date,
            price,
            contribution,
            investment,
            shares_purchased,
            total_shares,
            value,
            running_peak,
            drawdown,
            cumulative_investment,
        });
    }

    let Some(ledger) = Ledger::new(series.ticker(), rows) else {
        return Ok(None);
    };
    debug!(
        ticker = %ledger.ticker(),
        rows = ledger.len(),
        contributions = ledger.contribution_count(),
        "시뮬레이션 완료"
    );
    Ok(Some(ledger))
}

/// 여러 종목을 같은 매개변수로 시뮬레이션합니다.
///
/// 원장이 만들어지지 않은 종목은 실패 목록으로 분리됩니다.
pub fn simulate_all<'a, I>(
    series: I,
    params: &SimulationParams,
) -> (BTreeMap<String, Ledger>, Vec<TickerFailure>)
where
    I: IntoIterator<Item = &'a PriceSeries>,
{
    let mut ledgers = BTreeMap::new();
    let mut failures = Vec::new();

    for s in series {
        match try_simulate(s, params) {
            Ok(Some(ledger)) => {
                ledgers.insert(ledger.ticker().to_string(), ledger);
            }
            Ok(None) => failures.push(TickerFailure::new(s.ticker(), NO_PRICES_REASON)),
            Err(e) => failures.push(TickerFailure::new(s.ticker(), e.to_string())),
        }
    }

    (ledgers, failures)
}
