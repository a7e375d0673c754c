//! 지원하는 투자 주기 목록 출력.

use dca_core::{Cadence, ContributionAnchor};

/// 사용 가능한 투자 주기와 투자일 기준 출력
pub fn print_cadences() {
    println!("\n📋 사용 가능한 투자 주기:");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  코드      | 설명");
    println!("  ─────────────────────────────────────────────────────────────");
    for (code, description) in Cadence::supported_codes() {
        println!("  {:<9} | {}", code, description);
    }
    println!();
    println!("  기본값: {} ({})", Cadence::default(), Cadence::default().display_name());
    println!();
    println!("📌 투자일 기준 (--anchor):");
    println!(
        "  {:<10} | 구간마다 실제 거래가 있는 첫 날 (기본값)",
        ContributionAnchor::FirstObserved.to_string()
    );
    println!(
        "  {:<10} | 구간 종료일(월말/기준 요일)이 거래일일 때만",
        ContributionAnchor::PeriodEnd.to_string()
    );
    println!("═══════════════════════════════════════════════════════════════");
    println!();
}
