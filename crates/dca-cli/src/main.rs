//! DCA 시뮬레이터 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # SPY, AAPL에 2015년부터 매월 500달러 적립
//! dca simulate --tickers "SPY, AAPL" -f 2015-01-01 -t 2024-01-01 -a 500 -c M
//!
//! # 결과를 JSON으로 저장
//! dca simulate --tickers SPY -c W-FRI -o results/spy.json
//!
//! # 종가 데이터를 CSV로 내려받은 뒤 오프라인 실행
//! dca fetch -s SPY -f 2015-01-01 -t 2024-01-01
//! dca simulate --tickers SPY --source csv
//!
//! # 지원하는 투자 주기 보기
//! dca cadences
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use dca_cli::commands::cadences::print_cadences;
use dca_cli::commands::fetch::{fetch_to_csv, FetchCliConfig};
use dca_cli::commands::parse_date;
use dca_cli::commands::simulate::{run_simulation, SimulateCliConfig, SimulateOverrides};
use dca_core::{init_logging, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "dca")]
#[command(about = "DCA simulator - 적립식 투자 시뮬레이션 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (TOML, 없으면 기본값과 DCA__ 환경변수 사용)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 적립식 투자 시뮬레이션 실행
    Simulate {
        /// 종목 목록 (쉼표로 구분, 예: "SPY, AAPL")
        #[arg(long)]
        tickers: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        to: Option<String>,

        /// 종목별 회차당 투자 금액
        #[arg(short, long)]
        amount: Option<String>,

        /// 투자 주기 (M: 매월, W-FRI: 매주, B: 매일)
        #[arg(short, long)]
        cadence: Option<String>,

        /// 투자일 기준 (first, period-end)
        #[arg(long)]
        anchor: Option<String>,

        /// 데이터 소스 (yahoo, csv)
        #[arg(long)]
        source: Option<String>,

        /// CSV 데이터 디렉토리
        #[arg(long)]
        data_dir: Option<String>,

        /// 결과 저장 경로 (.csv: 포트폴리오 원장, .json: 전체 리포트)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 일별 종가를 CSV로 다운로드 (Yahoo Finance)
    Fetch {
        /// 티커 (예: SPY)
        #[arg(short = 's', long)]
        ticker: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        to: String,

        /// 출력 파일 경로 (기본: {data_dir}/{TICKER}.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 지원하는 투자 주기 목록 보기
    Cadences,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    init_logging(LogConfig::from_settings(&app_config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::Simulate {
            tickers,
            from,
            to,
            amount,
            cadence,
            anchor,
            source,
            data_dir,
            output,
        } => {
            let overrides = SimulateOverrides {
                tickers,
                from,
                to,
                amount,
                cadence,
                anchor,
                source,
                data_dir,
                output,
            };
            let config =
                SimulateCliConfig::resolve(overrides, &app_config.simulation, &app_config.data)?;

            match run_simulation(&config).await {
                Ok(report) => {
                    info!(
                        succeeded = report.ledgers.len(),
                        failed = report.failures.len(),
                        "✅ Simulation finished"
                    );
                }
                Err(e) => {
                    error!("Simulation failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Fetch {
            ticker,
            from,
            to,
            output,
        } => {
            let config = FetchCliConfig {
                ticker,
                start_date: parse_date(&from)?,
                end_date: parse_date(&to)?,
                output_path: output,
            };

            match fetch_to_csv(&config, &app_config.data).await {
                Ok((path, count)) => {
                    info!("✅ Successfully downloaded {} closes", count);
                    println!("\n데이터 다운로드 완료: {} 건", count);
                    println!("저장 위치: {}", path.display());
                }
                Err(e) => {
                    error!("Download failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Cadences => print_cadences(),
    }

    Ok(())
}
