//! 투자 주기 정의.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DcaError;

/// 투자 주기.
///
/// 주기는 투자일이 선택되는 달력 구간을 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cadence {
    /// 매 거래일
    Daily,
    /// 매주, 주어진 요일로 끝나는 주 단위
    Weekly(Weekday),
    /// 매월, 달력 월 단위
    #[default]
    Monthly,
}

impl Cadence {
    /// 금요일 기준 주간 주기.
    pub const WEEKLY_FRIDAY: Cadence = Cadence::Weekly(Weekday::Fri);

    /// 표시 이름.
    pub fn display_name(&self) -> &'static str {
        match self {
            Cadence::Daily => "매일",
            Cadence::Weekly(_) => "매주",
            Cadence::Monthly => "매월",
        }
    }

    /// 지원하는 주기 코드와 설명 목록.
    pub fn supported_codes() -> &'static [(&'static str, &'static str)] {
        &[
            ("B", "매 거래일 (daily)"),
            ("W-FRI", "매주, 금요일로 끝나는 주의 첫 거래일 (weekly)"),
            ("W-MON..W-SUN", "매주, 지정 요일로 끝나는 주"),
            ("M", "매월 첫 거래일 (monthly)"),
        ]
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => write!(f, "B"),
            Cadence::Weekly(anchor) => write!(f, "W-{}", weekday_code(*anchor)),
            Cadence::Monthly => write!(f, "M"),
        }
    }
}

impl FromStr for Cadence {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "B" | "D" | "1D" | "DAILY" => Ok(Cadence::Daily),
            "W" | "1W" | "WEEKLY" => Ok(Cadence::WEEKLY_FRIDAY),
            "M" | "ME" | "1M" | "MONTHLY" => Ok(Cadence::Monthly),
            other => other
                .strip_prefix("W-")
                .and_then(parse_weekday_code)
                .map(Cadence::Weekly)
                .ok_or_else(|| {
                    DcaError::InvalidParameters(format!(
                        "Invalid cadence: {}. Supported: M (monthly), W-FRI (weekly), B (daily)",
                        s
                    ))
                }),
        }
    }
}

/// 투자일 선택 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionAnchor {
    /// 각 구간에서 실제로 존재하는 첫 날짜
    #[default]
    FirstObserved,
    /// 구간 종료 라벨(월말 또는 기준 요일)이 거래일인 경우에만 투자
    PeriodEnd,
}

impl fmt::Display for ContributionAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionAnchor::FirstObserved => write!(f, "first"),
            ContributionAnchor::PeriodEnd => write!(f, "period-end"),
        }
    }
}

impl FromStr for ContributionAnchor {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "first-observed" | "start" => Ok(ContributionAnchor::FirstObserved),
            "period-end" | "end" | "label" => Ok(ContributionAnchor::PeriodEnd),
            _ => Err(DcaError::InvalidParameters(format!(
                "Invalid contribution anchor: {}. Supported: first, period-end",
                s
            ))),
        }
    }
}

fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

fn parse_weekday_code(code: &str) -> Option<Weekday> {
    match code {
        "MON" => Some(Weekday::Mon),
        "TUE" => Some(Weekday::Tue),
        "WED" => Some(Weekday::Wed),
        "THU" => Some(Weekday::Thu),
        "FRI" => Some(Weekday::Fri),
        "SAT" => Some(Weekday::Sat),
        "SUN" => Some(Weekday::Sun),
        _ => None,
    }
}
