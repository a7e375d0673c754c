//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `DCA__` 접두사 환경 변수 순으로 덮어씁니다.
//! CLI 플래그는 이 설정보다 우선합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 시세 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 시뮬레이션 기본값
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// 시세 데이터 소스 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Yahoo Finance chart API
    #[default]
    Yahoo,
    /// 로컬 CSV 디렉토리
    Csv,
}

impl std::str::FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" | "yf" => Ok(Self::Yahoo),
            "csv" | "file" => Ok(Self::Csv),
            _ => Err(format!("Unknown data source: {}. Supported: yahoo, csv", s)),
        }
    }
}

/// 시세 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 데이터 소스
    #[serde(default)]
    pub source: DataSource,
    /// Yahoo Finance API 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// CSV 파일 디렉토리
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// 종목별 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 동시 요청 수
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    /// HTTP User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_timeout_secs() -> u64 {
    20
}
fn default_max_concurrent() -> usize {
    4
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            timeout_secs: default_timeout_secs(),
            max_concurrent_requests: default_max_concurrent(),
            user_agent: default_user_agent(),
        }
    }
}

/// 시뮬레이션 기본값.
///
/// 날짜와 주기는 문자열로 보관하고 실행 직전에 파싱합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// 종목 목록 (콤마 구분)
    pub tickers: String,
    /// 시작 날짜 (YYYY-MM-DD)
    pub start_date: String,
    /// 종료 날짜 (YYYY-MM-DD)
    pub end_date: String,
    /// 종목별 회차당 투자 금액
    pub contribution: Decimal,
    /// 투자 주기 (M, W-FRI, B)
    pub cadence: String,
    /// 투자일 기준 (first, period-end)
    pub anchor: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tickers: "SPY, AAPL".to_string(),
            start_date: "2015-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
            contribution: Decimal::new(500, 0),
            cadence: "M".to_string(),
            anchor: "first".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let defaults = SimulationConfig::default();
        let builder = config::Config::builder()
            .set_default("simulation.tickers", defaults.tickers)?
            .set_default("simulation.start_date", defaults.start_date)?
            .set_default("simulation.end_date", defaults.end_date)?
            .set_default("simulation.contribution", defaults.contribution.to_string())?
            .set_default("simulation.cadence", defaults.cadence)?
            .set_default("simulation.anchor", defaults.anchor)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("DCA")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
