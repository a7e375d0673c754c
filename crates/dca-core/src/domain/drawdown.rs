//! 고점 추적 및 낙폭 계산.
//!
//! 종목 원장과 포트폴리오 원장이 같은 규칙으로 낙폭을 계산합니다.

use rust_decimal::Decimal;

use crate::types::{Amount, Ratio};

/// 고점 대비 낙폭을 계산합니다.
///
/// `value / peak - 1`이며 항상 0 이하입니다. 고점이 0이면 0입니다.
pub fn drawdown(value: Amount, peak: Amount) -> Ratio {
    if peak <= Decimal::ZERO || value >= peak {
        return Decimal::ZERO;
    }
    value / peak - Decimal::ONE
}

/// 누적 고점 추적기.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakTracker {
    peak: Amount,
}

impl PeakTracker {
    /// 새 추적기를 생성합니다. 초기 고점은 0입니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 고점을 반환합니다.
    pub fn peak(&self) -> Amount {
        self.peak
    }

    /// 새 가치를 반영하고 (누적 고점, 낙폭)을 반환합니다.
    pub fn update(&mut self, value: Amount) -> (Amount, Ratio) {
        if value > self.peak {
            self.peak = value;
        }
        (self.peak, drawdown(value, self.peak))
    }
}
