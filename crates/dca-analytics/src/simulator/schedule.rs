//! 투자일 선택.
//!
//! 투자 주기는 달력을 구간으로 나눕니다:
//! - 매일: 날짜 자신
//! - 매주: ISO 주 (월요일~일요일)
//! - 매월: 달력 월
//!
//! 선택 기준이 `FirstObserved`이면 구간마다 실제로 존재하는 첫 날짜에 투자합니다.
//! `PeriodEnd`이면 종료 라벨(월말 또는 기준 요일) 날짜가 시계열에 있을 때만
//! 투자합니다. 라벨이 휴장일이면 그 구간은 건너뛰며 가까운 날짜로 옮기지 않습니다.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use dca_core::{Cadence, ContributionAnchor};

/// 날짜가 속한 구간의 시작일을 반환합니다.
///
/// 주간 구간은 기준 요일과 무관하게 ISO 주의 월요일에서 시작합니다.
pub fn period_start(date: NaiveDate, cadence: Cadence) -> NaiveDate {
    match cadence {
        Cadence::Daily => date,
        Cadence::Weekly(_) => {
            date - Days::new(u64::from(date.weekday().num_days_from_monday()))
        }
        Cadence::Monthly => date.with_day(1).unwrap_or(date),
    }
}

/// 날짜 이후 가장 가까운 종료 라벨(당일 포함)을 반환합니다.
///
/// 주간 주기에서는 기준 요일, 월간 주기에서는 월말입니다.
pub fn period_end(date: NaiveDate, cadence: Cadence) -> NaiveDate {
    match cadence {
        Cadence::Daily => date,
        Cadence::Weekly(anchor) => {
            let ahead = (7 + anchor.num_days_from_monday() - date.weekday().num_days_from_monday())
                % 7;
            date + Days::new(u64::from(ahead))
        }
        Cadence::Monthly => month_end(date),
    }
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// `[start, end]`를 덮는 달력 구간 종료 라벨 전체를 반환합니다.
///
/// 마지막 라벨은 `end`가 속한 구간의 라벨이므로 `end`보다 늦을 수 있습니다.
pub fn calendar_grid(start: NaiveDate, end: NaiveDate, cadence: Cadence) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }

    let last = period_end(end, cadence);
    let mut labels = Vec::new();
    let mut label = period_end(start, cadence);

    while label <= last {
        labels.push(label);
        match label.succ_opt() {
            Some(next_day) => label = period_end(next_day, cadence),
            None => break,
        }
    }

    labels
}

/// 정렬된 날짜 목록에서 투자일 여부를 나타내는 마스크를 계산합니다.
///
/// 반환 벡터는 `dates`와 길이와 순서가 같습니다.
pub fn contribution_mask(
    dates: &[NaiveDate],
    cadence: Cadence,
    anchor: ContributionAnchor,
) -> Vec<bool> {
    match (cadence, anchor) {
        (Cadence::Daily, _) => vec![true; dates.len()],
        (_, ContributionAnchor::FirstObserved) => {
            let mut previous: Option<NaiveDate> = None;
            dates
                .iter()
                .map(|date| {
                    let bucket = period_start(*date, cadence);
                    let first_in_period = previous != Some(bucket);
                    previous = Some(bucket);
                    first_in_period
                })
                .collect()
        }
        (_, ContributionAnchor::PeriodEnd) => {
            let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
                return Vec::new();
            };
            let grid: HashSet<NaiveDate> =
                calendar_grid(*first, *last, cadence).into_iter().collect();
            dates.iter().map(|date| grid.contains(date)).collect()
        }
    }
}

/// 정렬된 날짜 목록에서 투자일만 골라 반환합니다.
pub fn contribution_dates(
    dates: &[NaiveDate],
    cadence: Cadence,
    anchor: ContributionAnchor,
) -> Vec<NaiveDate> {
    dates
        .iter()
        .zip(contribution_mask(dates, cadence, anchor))
        .filter_map(|(date, selected)| selected.then_some(*date))
        .collect()
}
