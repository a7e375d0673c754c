//! 검증된 시뮬레이션 매개변수.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DcaError;
use crate::types::{Amount, Cadence, ContributionAnchor};

/// 회차당 투자 금액 상한 (1조).
pub const MAX_CONTRIBUTION: Amount = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// 단일 종목 시뮬레이션 매개변수.
///
/// [`SimulationParams::new`]를 통해서만 생성되므로 항상
/// `start <= end`, `contribution >= 0`을 만족합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    start: NaiveDate,
    end: NaiveDate,
    contribution: Amount,
    cadence: Cadence,
    anchor: ContributionAnchor,
}

impl SimulationParams {
    /// 매개변수를 검증하고 생성합니다.
    ///
    /// # Errors
    ///
    /// - 시작일이 종료일보다 늦은 경우
    /// - 투자 금액이 음수이거나 [`MAX_CONTRIBUTION`]을 넘는 경우
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        contribution: Amount,
        cadence: Cadence,
    ) -> Result<Self, DcaError> {
        if start > end {
            return Err(DcaError::InvalidParameters(format!(
                "Start date {} must not be after end date {}",
                start, end
            )));
        }
        if contribution < Decimal::ZERO {
            return Err(DcaError::InvalidParameters(format!(
                "Contribution amount must be non-negative, got {}",
                contribution
            )));
        }
        if contribution > MAX_CONTRIBUTION {
            return Err(DcaError::InvalidParameters(format!(
                "Contribution amount must not exceed {}, got {}",
                MAX_CONTRIBUTION, contribution
            )));
        }

        Ok(Self {
            start,
            end,
            contribution,
            cadence,
            anchor: ContributionAnchor::default(),
        })
    }

    /// 투자일 선택 기준을 설정합니다.
    pub fn with_anchor(mut self, anchor: ContributionAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// 시작일 (포함).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// 종료일 (포함).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 회차당 투자 금액.
    pub fn contribution(&self) -> Amount {
        self.contribution
    }

    /// 투자 주기.
    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// 투자일 선택 기준.
    pub fn anchor(&self) -> ContributionAnchor {
        self.anchor
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
    fn test_valid_params() {
        let params = SimulationParams::new(d(2024, 1, 1), d(2024, 1, 1), dec!(0), Cadence::Daily)
            .unwrap()
            .with_anchor(ContributionAnchor::PeriodEnd);

        assert_eq!(params.contribution(), Decimal::ZERO);
        assert_eq!(params.anchor(), ContributionAnchor::PeriodEnd);
    }

    #[test]
    fn test_start_after_end() {
        let result = SimulationParams::new(d(2024, 2, 1), d(2024, 1, 1), dec!(500), Cadence::Monthly);
        assert!(matches!(result, Err(DcaError::InvalidParameters(_))));
    }

    #[test]
    fn test_negative_contribution() {
        let result =
            SimulationParams::new(d(2024, 1, 1), d(2024, 2, 1), dec!(-1), Cadence::Monthly);
        assert!(matches!(result, Err(DcaError::InvalidParameters(_))));
    }

    #[test]
    fn test_contribution_upper_bound() {
        assert_eq!(MAX_CONTRIBUTION, Decimal::from(1_000_000_000_000i64));

        let at_limit =
            SimulationParams::new(d(2024, 1, 1), d(2024, 2, 1), MAX_CONTRIBUTION, Cadence::Daily);
        assert!(at_limit.is_ok());

        let huge = SimulationParams::new(
            d(2024, 1, 1),
            d(2024, 2, 1),
            Decimal::from_scientific("5e27").unwrap(),
            Cadence::Daily,
        );
        assert!(matches!(huge, Err(DcaError::InvalidParameters(_))));
    }
}
