//! Yahoo Finance chart API 제공자.
//!
//! `GET {base_url}/v8/finance/chart/{TICKER}?period1=..&period2=..&interval=1d`
//! 응답에서 일별 종가를 추출합니다. 조정 종가가 있으면 우선 사용합니다.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use dca_core::{DataConfig, Price, PricePoint, PriceSeries};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::PriceProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: Option<YahooMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooMeta {
    /// 거래소 현지 시간 오프셋 (초)
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 일별 종가 제공자.
#[derive(Debug, Clone)]
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// 새 제공자를 생성합니다.
    pub fn new(base_url: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// 설정으로부터 제공자를 생성합니다.
    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = Utc
            .from_utc_datetime(&start.and_time(chrono::NaiveTime::MIN))
            .timestamp();
        // 종료일 포함
        let end_ts = Utc
            .from_utc_datetime(&end.and_time(chrono::NaiveTime::MIN))
            .timestamp()
            + 86_399;

        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, ticker, start_ts, end_ts
        )
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    #[instrument(skip(self))]
    async fn fetch_daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        let url = self.chart_url(ticker, start, end);
        debug!("Fetching from Yahoo Finance: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::NotFound(format!("Unknown ticker: {}", ticker)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "Yahoo Finance API error: {} - {}",
                status, body
            )));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Yahoo Finance response received");

        parse_chart_response(ticker, &body)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// chart API 응답 본문을 종가 시계열로 변환합니다.
///
/// 타임스탬프는 거래소 현지 날짜로 변환하며, 같은 날짜가 중복되면
/// 나중 값을 사용합니다. 수정 종가 열이 있으면 그 열만 사용하고, 비어 있는
/// 칸은 종가로 채우지 않고 누락으로 둡니다.
pub(crate) fn parse_chart_response(ticker: &str, body: &str) -> Result<PriceSeries> {
    let chart_response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = chart_response.chart.error {
        return Err(DataError::NotFound(format!(
            "Yahoo Finance error: {} - {}",
            error.code, error.description
        )));
    }

    let result = chart_response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::NotFound(format!("No data returned for {}", ticker)))?;

    let offset = result.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close);
    let closes = match adj_closes {
        Some(adj_closes) => adj_closes,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .unwrap_or_default(),
    };

    let mut by_date: BTreeMap<NaiveDate, Option<Price>> = BTreeMap::new();

    for (i, ts) in timestamps.iter().enumerate() {
        let Some(date) = chrono::DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive())
        else {
            continue;
        };

        let close = closes.get(i).copied().flatten().and_then(f64_to_price);

        by_date.insert(date, close);
    }

    let points = by_date
        .into_iter()
        .map(|(date, close)| PricePoint { date, close })
        .collect();

    Ok(PriceSeries::new(ticker, points)?)
}

fn f64_to_price(value: f64) -> Option<Price> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&format!("{:.6}", value)).ok()
}
