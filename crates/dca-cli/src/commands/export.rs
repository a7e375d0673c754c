//! 시뮬레이션 결과 내보내기.
//!
//! 확장자가 `.json`이면 전체 리포트를, 그 외에는 포트폴리오 일별 원장을
//! CSV로 저장합니다.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use dca_analytics::RunReport;
use dca_core::PortfolioLedger;

/// 포트폴리오 CSV 헤더
pub const PORTFOLIO_CSV_HEADER: &str =
    "date,daily_investment,cumulative_investment,value,running_peak,drawdown";

/// 내보내기 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// 파일 확장자로 형식 결정 (기본: CSV)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// 포트폴리오 원장을 CSV로 기록합니다.
pub fn write_portfolio_csv<W: Write>(ledger: &PortfolioLedger, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", PORTFOLIO_CSV_HEADER)?;
    for row in ledger.rows() {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            row.date.format("%Y-%m-%d"),
            row.daily_investment,
            row.cumulative_investment,
            row.value.round_dp(6),
            row.running_peak.round_dp(6),
            row.drawdown.round_dp(6),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// 리포트를 파일로 저장합니다.
///
/// 상위 디렉토리가 없으면 생성합니다.
pub fn save_report(report: &RunReport, path: &str) -> Result<()> {
    let path = Path::new(path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);

    match ExportFormat::from_path(path) {
        ExportFormat::Json => serde_json::to_writer_pretty(writer, report)?,
        ExportFormat::Csv => write_portfolio_csv(&report.portfolio.ledger, writer)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dca_core::PortfolioRow;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out")), ExportFormat::Csv);
    }

    #[test]
    fn test_write_portfolio_csv() {
        let ledger = PortfolioLedger::new(vec![
            PortfolioRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                daily_investment: dec!(100),
                cumulative_investment: dec!(100),
                value: dec!(100),
                running_peak: dec!(100),
                drawdown: Decimal::ZERO,
            },
            PortfolioRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                daily_investment: Decimal::ZERO,
                cumulative_investment: dec!(100),
                value: dec!(80),
                running_peak: dec!(100),
                drawdown: dec!(-0.2),
            },
        ]);

        let mut buf = Vec::new();
        write_portfolio_csv(&ledger, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], PORTFOLIO_CSV_HEADER);
        assert_eq!(lines[1], "2024-01-02,100,100,100,100,0");
        assert_eq!(lines[2], "2024-01-03,0,100,80,100,-0.2");
    }
}
