//! 시뮬레이션 실행기.
//!
//! 티커 목록을 받아 종목별로 데이터를 조회하고 시뮬레이션한 뒤 포트폴리오로
//! 집계합니다. 한 종목의 실패는 해당 종목만 제외하고 나머지는 계속 진행합니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! let runner = SimulationRunner::new(provider, RunnerConfig::default());
//! let request = SimulationRequest::new("SPY, AAPL", params)?;
//! let report = runner.run(&request).await?;
//!
//! for failure in &report.failures {
//!     eprintln!("{}", failure);
//! }
//! println!("ROI: {}", report.portfolio.summary.roi);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use dca_core::{
    parse_tickers, ticker_span, DataConfig, DcaError, Ledger, SimulationParams, TickerFailure,
};
use dca_data::PriceProvider;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument};

use crate::portfolio::{aggregate, Portfolio};
use crate::simulator::{try_simulate, NO_PRICES_REASON};

/// 검증된 실행 요청.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// 정규화된 티커 목록 (대문자, 중복 제거, 입력 순서 유지)
    pub tickers: Vec<String>,
    /// 모든 종목에 공통으로 적용되는 매개변수
    pub params: SimulationParams,
}

impl SimulationRequest {
    /// 쉼표로 구분된 티커 입력을 파싱하여 요청을 만듭니다.
    ///
    /// # Errors
    ///
    /// 유효한 티커가 하나도 없으면 [`DcaError::InvalidParameters`]을 반환합니다.
    pub fn new(tickers_input: &str, params: SimulationParams) -> Result<Self, DcaError> {
        Ok(Self {
            tickers: parse_tickers(tickers_input)?,
            params,
        })
    }
}

/// 실행기 설정.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// 동시에 진행할 최대 조회 수
    pub max_concurrent_requests: usize,
    /// 종목별 조회 제한 시간
    pub request_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 4,
            request_timeout: Duration::from_secs(20),
        }
    }
}

impl RunnerConfig {
    /// 데이터 설정에서 생성합니다.
    pub fn from_config(config: &DataConfig) -> Self {
        Self {
            max_concurrent_requests: config.max_concurrent_requests.max(1),
            request_timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }
}

/// 실행 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// 실행한 요청
    pub request: SimulationRequest,
    /// 제외된 종목과 사유 (요청 순서)
    pub failures: Vec<TickerFailure>,
    /// 성공한 종목별 원장
    pub ledgers: BTreeMap<String, Ledger>,
    /// 집계 결과
    pub portfolio: Portfolio,
}

impl RunReport {
    /// 일부 종목이 제외되었는지 여부.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// 성공한 티커 목록 (티커 순).
    pub fn succeeded(&self) -> Vec<&str> {
        self.ledgers.keys().map(String::as_str).collect()
    }
}

/// 종목별 조회와 시뮬레이션, 집계를 수행하는 실행기.
pub struct SimulationRunner {
    provider: Arc<dyn PriceProvider>,
    config: RunnerConfig,
}

impl SimulationRunner {
    /// 새 실행기 생성.
    pub fn new(provider: Arc<dyn PriceProvider>, config: RunnerConfig) -> Self {
        Self { provider, config }
    }

    /// 사용 중인 Provider 이름.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 요청을 실행합니다.
    ///
    /// 종목별 조회는 최대 `max_concurrent_requests`개까지 동시에 진행되며,
    /// 각 조회는 `request_timeout` 안에 끝나지 않으면 실패로 처리됩니다.
    ///
    /// # Errors
    ///
    /// 모든 종목이 실패하면 [`DcaError::AllTickersFailed`]를 반환합니다.
    pub async fn run(&self, request: &SimulationRequest) -> Result<RunReport, DcaError> {
        let params = request.params;
        info!(
            provider = %self.provider.name(),
            tickers = request.tickers.len(),
            start = %params.start(),
            end = %params.end(),
            cadence = %params.cadence(),
            "시뮬레이션 시작"
        );

        let outcomes: Vec<Result<Ledger, TickerFailure>> =
            stream::iter(request.tickers.iter().cloned())
                .map(|ticker| self.simulate_ticker(ticker, params))
                .buffered(self.config.max_concurrent_requests.max(1))
                .collect()
                .await;

        let mut ledgers = BTreeMap::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(ledger) => {
                    ledgers.insert(ledger.ticker().to_string(), ledger);
                }
                Err(failure) => failures.push(failure),
            }
        }

        if ledgers.is_empty() {
            warn!(failed = failures.len(), "모든 종목 실패");
            return Err(DcaError::AllTickersFailed { failures });
        }

        let portfolio = aggregate(&ledgers)?;
        info!(
            succeeded = ledgers.len(),
            failed = failures.len(),
            final_value = %portfolio.summary.final_value,
            "시뮬레이션 완료"
        );

        Ok(RunReport {
            request: request.clone(),
            failures,
            ledgers,
            portfolio,
        })
    }

    async fn simulate_ticker(
        &self,
        ticker: String,
        params: SimulationParams,
    ) -> Result<Ledger, TickerFailure> {
        let span = ticker_span!("simulate_ticker", ticker, params.cadence());

        async move {
            let fetch = self
                .provider
                .fetch_daily_closes(&ticker, params.start(), params.end());

            let series = match tokio::time::timeout(self.config.request_timeout, fetch).await {
                Ok(Ok(series)) => series,
                Ok(Err(e)) => {
                    warn!(error = %e, "데이터 조회 실패");
                    return Err(TickerFailure::new(&ticker, e.to_string()));
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.config.request_timeout.as_secs(),
                        "데이터 조회 시간 초과"
                    );
                    return Err(TickerFailure::new(
                        &ticker,
                        format!(
                            "{}초 안에 응답이 없습니다",
                            self.config.request_timeout.as_secs()
                        ),
                    ));
                }
            };

            match try_simulate(&series, &params) {
                Ok(Some(ledger)) => Ok(ledger),
                Ok(None) => {
                    warn!("유효한 가격 데이터 없음");
                    Err(TickerFailure::new(&ticker, NO_PRICES_REASON))
                }
                Err(e) => {
                    warn!(error = %e, "시뮬레이션 실패");
                    Err(TickerFailure::new(&ticker, e.to_string()))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dca_core::Cadence;
    use rust_decimal_macros::dec;

    fn params() -> SimulationParams {
        SimulationParams::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            dec!(100),
            Cadence::Monthly,
        )
        .unwrap()
    }

    #[test]
    fn test_request_normalizes_tickers() {
        let request = SimulationRequest::new(" spy, aapl ,SPY,,", params()).unwrap();
        assert_eq!(request.tickers, vec!["SPY", "AAPL"]);
    }

    #[test]
    fn test_request_rejects_empty_tickers() {
        assert!(matches!(
            SimulationRequest::new(" , ", params()),
            Err(DcaError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_runner_config_from_data_config() {
        let data = DataConfig {
            timeout_secs: 0,
            max_concurrent_requests: 0,
            ..DataConfig::default()
        };
        let config = RunnerConfig::from_config(&data);
        assert_eq!(config.max_concurrent_requests, 1);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }
}
