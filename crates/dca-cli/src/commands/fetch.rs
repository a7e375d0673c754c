//! 종가 데이터 다운로드 명령어.
//!
//! Yahoo Finance에서 일별 종가를 받아 CSV Provider가 읽는 형식
//! (`date,close`)으로 저장합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # data/SPY.csv로 저장 (CSV Provider 기본 위치)
//! dca fetch -s SPY -f 2015-01-01 -t 2024-01-01
//!
//! # 출력 경로 지정
//! dca fetch -s AAPL -f 2020-01-01 -t 2024-01-01 -o /tmp/aapl.csv
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use dca_core::DataConfig;
use dca_data::{save_series_csv, CsvPriceProvider, PriceProvider, YahooChartProvider};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// 다운로드 설정
#[derive(Debug, Clone)]
pub struct FetchCliConfig {
    /// 티커
    pub ticker: String,
    /// 시작일
    pub start_date: NaiveDate,
    /// 종료일
    pub end_date: NaiveDate,
    /// 출력 파일 경로 (없으면 `{data_dir}/{TICKER}.csv`)
    pub output_path: Option<String>,
}

impl FetchCliConfig {
    /// 실제 저장 경로.
    pub fn resolve_output(&self, data: &DataConfig) -> Result<PathBuf> {
        match &self.output_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(CsvPriceProvider::new(&data.data_dir).path_for(self.ticker.trim())?),
        }
    }
}

/// 종가 데이터를 내려받아 CSV로 저장합니다.
///
/// 저장 경로와 저장한 행 수를 반환합니다.
pub async fn fetch_to_csv(config: &FetchCliConfig, data: &DataConfig) -> Result<(PathBuf, usize)> {
    if config.start_date > config.end_date {
        return Err(anyhow!("Start date must be before end date"));
    }

    let ticker = config.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(anyhow!("Ticker must not be empty"));
    }

    let provider = YahooChartProvider::from_config(data)?;
    let output = config.resolve_output(data)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {} from {}...", ticker, provider.name()));

    let series = match provider
        .fetch_daily_closes(&ticker, config.start_date, config.end_date)
        .await
    {
        Ok(series) => series,
        Err(e) => {
            pb.finish_and_clear();
            return Err(anyhow!("Failed to fetch {}: {}", ticker, e));
        }
    };

    if series.is_empty() {
        pb.finish_and_clear();
        return Err(anyhow!(
            "No data returned for {} between {} and {}",
            ticker,
            config.start_date,
            config.end_date
        ));
    }

    pb.finish_with_message(format!("Downloaded {} closes", series.len()));

    let count = save_series_csv(&output, &series)?;
    info!(ticker = %ticker, rows = count, path = %output.display(), "종가 저장 완료");

    Ok((output, count))
}
