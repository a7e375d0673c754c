//! 시뮬레이터의 에러 타입.
//!
//! 종목 단위 실패는 실행 전체로 전파되지 않습니다. 모든 종목이 실패한
//! 경우에만 `AllTickersFailed`로 실행이 중단됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 종목별 실패 기록.
///
/// 데이터 없음, 알 수 없는 티커, 상위 제공자 에러는 시뮬레이션 관점에서
/// 모두 같은 결과(데이터 없음)로 취급되며, 사유만 다르게 기록됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerFailure {
    /// 실패한 티커
    pub ticker: String,
    /// 실패 사유
    pub reason: String,
}

impl TickerFailure {
    /// 새 실패 기록을 생성합니다.
    pub fn new(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for TickerFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.ticker, self.reason)
    }
}

/// 핵심 시뮬레이션 에러.
#[derive(Debug, Error)]
pub enum DcaError {
    /// 잘못된 시뮬레이션 매개변수 (종목별 작업 시작 전에 즉시 실패)
    #[error("잘못된 매개변수: {0}")]
    InvalidParameters(String),

    /// 잘못된 입력 데이터
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 특정 종목의 데이터 없음
    #[error("{ticker} 데이터를 불러올 수 없습니다: {reason}")]
    NoDataForTicker { ticker: String, reason: String },

    /// 모든 종목 실패
    #[error("모든 종목의 데이터를 불러올 수 없습니다 ({} 종목 실패)", failures.len())]
    AllTickersFailed { failures: Vec<TickerFailure> },

    /// 집계할 원장이 하나도 없음
    #[error("집계할 데이터가 없습니다")]
    NoData,

    /// 금액 계산이 Decimal 표현 범위를 넘음
    #[error("{ticker} 계산 중 수치 범위 초과 ({date})")]
    ArithmeticOverflow { ticker: String, date: NaiveDate },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 시뮬레이션 작업을 위한 Result 타입.
pub type DcaResult<T> = Result<T, DcaError>;

impl DcaError {
    /// 실행 전체를 중단시키는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DcaError::NoDataForTicker { .. })
    }

    /// 종목별 실패 목록을 반환합니다.
    pub fn failures(&self) -> &[TickerFailure] {
        match self {
            DcaError::AllTickersFailed { failures } => failures,
            _ => &[],
        }
    }
}

impl From<TickerFailure> for DcaError {
    fn from(failure: TickerFailure) -> Self {
        DcaError::NoDataForTicker {
            ticker: failure.ticker,
            reason: failure.reason,
        }
    }
}

impl From<config::ConfigError> for DcaError {
    fn from(err: config::ConfigError) -> Self {
        DcaError::Config(err.to_string())
    }
}
