//! CLI 명령어 구현 모듈.

pub mod cadences;
pub mod export;
pub mod fetch;
pub mod simulate;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// `YYYY-MM-DD` 형식 날짜 파싱.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}
