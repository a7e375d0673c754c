//! 로컬 CSV 종가 제공자.
//!
//! `{data_dir}/{TICKER}.csv` 파일을 읽습니다. 지원 형식:
//! - `date,close`
//! - `date,open,high,low,close,volume` (`dca fetch` 출력 및 일반 OHLCV 파일)
//!
//! 헤더에 `adj close`/`adj_close` 열이 있으면 우선 사용합니다.
//! 빈 칸, `null`, `NaN` 종가는 누락으로 취급합니다.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use dca_core::{Price, PricePoint, PriceSeries};
use tracing::{debug, info, instrument};

use super::PriceProvider;
use crate::error::{DataError, Result};

/// CSV 디렉토리 기반 제공자.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    /// 새 제공자를 생성합니다.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 티커에 해당하는 파일 경로.
    ///
    /// 티커는 영숫자와 `-._^=`만 허용하며 `..`을 포함할 수 없습니다.
    /// 경로 구분자가 섞인 티커로 데이터 디렉토리 밖을 가리킬 수 없습니다.
    pub fn path_for(&self, ticker: &str) -> Result<PathBuf> {
        let valid = !ticker.is_empty()
            && !ticker.contains("..")
            && ticker
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-._^=".contains(c));
        if !valid {
            return Err(DataError::InvalidData(format!(
                "Ticker cannot be used as a file name: {:?}",
                ticker
            )));
        }
        Ok(self.dir.join(format!("{}.csv", ticker.to_uppercase())))
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    #[instrument(skip(self))]
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let path = self.path_for(ticker)?;
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DataError::NotFound(format!("No CSV file for {}: {}", ticker, path.display()))
            }
            _ => DataError::Io(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        let series = parse_closes_csv(ticker, &content)?;
        debug!(rows = series.len(), path = %path.display(), "Loaded CSV closes");

        Ok(series.restrict(start, end))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// CSV 본문을 종가 시계열로 변환합니다.
pub(crate) fn parse_closes_csv(ticker: &str, content: &str) -> Result<PriceSeries> {
    let mut lines = content.lines().enumerate().peekable();

    // 헤더가 있으면 열 위치를 결정하고, 없으면 열 개수로 추정
    let mut close_idx: Option<usize> = None;
    if let Some((_, first)) = lines.peek() {
        if first.to_lowercase().contains("date") {
            let headers: Vec<String> = first
                .split(',')
                .map(|h| h.trim().to_lowercase())
                .collect();
            close_idx = headers
                .iter()
                .position(|h| h == "adj close" || h == "adj_close" || h == "adjclose")
                .or_else(|| headers.iter().position(|h| h == "close"));
            if close_idx.is_none() {
                return Err(DataError::ParseError(format!(
                    "{}: CSV header has no close column",
                    ticker
                )));
            }
            lines.next();
        }
    }

    let mut by_date: BTreeMap<NaiveDate, Option<Price>> = BTreeMap::new();

    for (line_no, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let idx = close_idx.unwrap_or(if parts.len() >= 6 { 4 } else { 1 });

        let date = NaiveDate::parse_from_str(parts[0], "%Y-%m-%d").map_err(|e| {
            DataError::ParseError(format!(
                "{}: invalid date at line {}: {}",
                ticker,
                line_no + 1,
                e
            ))
        })?;

        let close = match parts.get(idx).copied() {
            None | Some("") => None,
            Some(raw) if raw.eq_ignore_ascii_case("null") || raw.eq_ignore_ascii_case("nan") => {
                None
            }
            Some(raw) => Some(raw.parse::<Price>().map_err(|e| {
                DataError::ParseError(format!(
                    "{}: invalid close at line {}: {}",
                    ticker,
                    line_no + 1,
                    e
                ))
            })?),
        };

        by_date.insert(date, close);
    }

    let points = by_date
        .into_iter()
        .map(|(date, close)| PricePoint { date, close })
        .collect();

    Ok(PriceSeries::new(ticker, points)?)
}

/// 종가 시계열을 `date,close` CSV 파일로 저장합니다.
///
/// 누락된 종가는 빈 칸으로 기록됩니다.
pub fn save_series_csv(path: impl AsRef<Path>, series: &PriceSeries) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "date,close")?;
    for point in series.points() {
        match point.close {
            Some(close) => writeln!(writer, "{},{}", point.date.format("%Y-%m-%d"), close)?,
            None => writeln!(writer, "{},", point.date.format("%Y-%m-%d"))?,
        }
    }
    writer.flush()?;

    info!("Saved {} closes to {}", series.len(), path.display());

    Ok(series.len())
}
