//! 시뮬레이션 명령어.
//!
//! # 사용 예시
//!
//! ```bash
//! # 설정 파일 기본값으로 실행
//! dca simulate
//!
//! # SPY, AAPL에 매월 500달러씩 적립
//! dca simulate --tickers "SPY, AAPL" -f 2015-01-01 -t 2024-01-01 -a 500 -c M
//!
//! # 매주 금요일 기준, 결과를 CSV로 저장
//! dca simulate --tickers QQQ -c W-FRI -o results/qqq.csv
//!
//! # 로컬 CSV 데이터 사용
//! dca simulate --tickers SPY --source csv --data-dir data
//! ```

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dca_analytics::{RunReport, RunnerConfig, SimulationRequest, SimulationRunner};
use dca_core::{
    Cadence, ContributionAnchor, DataConfig, DataSource, DecimalExt, SimulationConfig,
    SimulationParams,
};
use dca_data::provider_from_config;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::info;

use super::export::save_report;
use super::parse_date;

/// 명령줄에서 받은 값 (지정하지 않은 항목은 설정 파일 값을 사용)
#[derive(Debug, Clone, Default)]
pub struct SimulateOverrides {
    pub tickers: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
    pub cadence: Option<String>,
    pub anchor: Option<String>,
    pub source: Option<String>,
    pub data_dir: Option<String>,
    pub output: Option<String>,
}

/// 시뮬레이션 CLI 설정
#[derive(Debug, Clone)]
pub struct SimulateCliConfig {
    /// 종목 입력 (콤마 구분)
    pub tickers: String,
    /// 시작일
    pub start_date: NaiveDate,
    /// 종료일
    pub end_date: NaiveDate,
    /// 종목별 회차당 투자 금액
    pub contribution: Decimal,
    /// 투자 주기
    pub cadence: Cadence,
    /// 투자일 기준
    pub anchor: ContributionAnchor,
    /// 데이터 설정
    pub data: DataConfig,
    /// 결과 저장 경로
    pub output_path: Option<String>,
}

impl SimulateCliConfig {
    /// 명령줄 값과 설정 파일 값을 합칩니다. 명령줄 값이 우선합니다.
    pub fn resolve(
        overrides: SimulateOverrides,
        defaults: &SimulationConfig,
        data: &DataConfig,
    ) -> Result<Self> {
        let start_date = parse_date(overrides.from.as_deref().unwrap_or(&defaults.start_date))?;
        let end_date = parse_date(overrides.to.as_deref().unwrap_or(&defaults.end_date))?;

        let contribution = match overrides.amount.as_deref() {
            Some(amount) => Decimal::from_str(amount.trim())
                .with_context(|| format!("Invalid amount: {}", amount))?,
            None => defaults.contribution,
        };

        let cadence: Cadence = overrides
            .cadence
            .as_deref()
            .unwrap_or(&defaults.cadence)
            .parse()?;
        let anchor: ContributionAnchor = overrides
            .anchor
            .as_deref()
            .unwrap_or(&defaults.anchor)
            .parse()?;

        let mut data = data.clone();
        if let Some(source) = overrides.source.as_deref() {
            data.source = DataSource::from_str(source)
                .map_err(|e| anyhow::anyhow!("Invalid source: {}", e))?;
        }
        if let Some(dir) = overrides.data_dir {
            data.data_dir = dir;
        }

        Ok(Self {
            tickers: overrides.tickers.unwrap_or_else(|| defaults.tickers.clone()),
            start_date,
            end_date,
            contribution,
            cadence,
            anchor,
            data,
            output_path: overrides.output,
        })
    }

    /// 검증된 실행 요청 생성.
    pub fn request(&self) -> Result<SimulationRequest> {
        let params = SimulationParams::new(
            self.start_date,
            self.end_date,
            self.contribution,
            self.cadence,
        )?
        .with_anchor(self.anchor);

        Ok(SimulationRequest::new(&self.tickers, params)?)
    }
}

/// 시뮬레이션을 실행하고 리포트를 출력합니다.
pub async fn run_simulation(config: &SimulateCliConfig) -> Result<RunReport> {
    // 데이터 조회 전에 입력 검증
    let request = config.request()?;

    let provider = provider_from_config(&config.data)?;
    let runner = SimulationRunner::new(provider, RunnerConfig::from_config(&config.data));

    info!(
        provider = %runner.provider_name(),
        tickers = ?request.tickers,
        "시뮬레이션 요청"
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!(
        "Simulating {} ticker(s) via {}...",
        request.tickers.len(),
        runner.provider_name()
    ));

    let outcome = runner.run(&request).await;
    pb.finish_and_clear();

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            for failure in e.failures() {
                eprintln!("⚠️  {}", failure);
            }
            return Err(e.into());
        }
    };

    for failure in &report.failures {
        eprintln!("⚠️  {} 종목 제외: {}", failure.ticker, failure.reason);
    }

    println!("\n{}", format_report(&report));

    if let Some(output_path) = &config.output_path {
        save_report(&report, output_path)?;
        info!("Report saved to: {}", output_path);
        println!("저장 위치: {}", output_path);
    }

    Ok(report)
}

/// 리포트를 사람이 읽는 표 형식으로 변환합니다.
pub fn format_report(report: &RunReport) -> String {
    let params = &report.request.params;
    let summary = &report.portfolio.summary;
    let mut out = String::new();

    out.push_str("📈 적립식 투자 시뮬레이션 결과\n");
    out.push_str("═══════════════════════════════════════════════════════════════\n");
    out.push_str(&format!(
        "  기간: {} ~ {} | 주기: {} ({}) | 회차당 {}\n",
        params.start(),
        params.end(),
        params.cadence(),
        params.cadence().display_name(),
        params.contribution().to_currency_string(),
    ));
    out.push('\n');
    out.push_str(&format!(
        "  {:<8} | {:>14} | {:>14} | {:>9} | {:>9} | {:>5}\n",
        "종목", "투자금", "평가금", "수익률", "MDD", "회차"
    ));
    out.push_str("  ─────────────────────────────────────────────────────────────\n");

    for ticker in &report.portfolio.tickers {
        out.push_str(&format!(
            "  {:<8} | {:>14} | {:>14} | {:>9} | {:>9} | {:>5}\n",
            ticker.ticker,
            ticker.total_invested.to_currency_string(),
            ticker.final_value.to_currency_string(),
            ticker.roi.to_percentage_string(),
            ticker.max_drawdown.to_percentage_string(),
            ticker.contributions,
        ));
    }

    out.push('\n');
    out.push_str("💼 포트폴리오\n");
    out.push_str(&format!(
        "  총 투자금:   {}\n",
        summary.total_invested.to_currency_string()
    ));
    out.push_str(&format!(
        "  최종 평가금: {}\n",
        summary.final_value.to_currency_string()
    ));
    out.push_str(&format!(
        "  손익:        {}\n",
        summary.profit().to_currency_string()
    ));
    out.push_str(&format!(
        "  수익률:      {}\n",
        summary.roi.to_percentage_string()
    ));
    match summary.max_drawdown_date {
        Some(date) => out.push_str(&format!(
            "  최대 낙폭:   {} ({})\n",
            summary.max_drawdown.to_percentage_string(),
            date
        )),
        None => out.push_str(&format!(
            "  최대 낙폭:   {}\n",
            summary.max_drawdown.to_percentage_string()
        )),
    }
    out.push_str("═══════════════════════════════════════════════════════════════");

    out
}
