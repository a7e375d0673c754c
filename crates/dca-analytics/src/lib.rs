//! 적립식 투자 시뮬레이션 및 포트폴리오 집계 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 투자 주기별 투자일 선택 ([`simulator::schedule`])
//! - 단일 종목 시뮬레이터 ([`simulator::simulate`])
//! - 포트폴리오 집계 ([`portfolio::aggregate`])
//! - 종목별 데이터 조회부터 집계까지의 실행 오케스트레이션 ([`runner`])
//!
//! 데이터는 한 방향으로만 흐릅니다:
//! 종가 시계열 → 종목별 원장 → 포트폴리오 원장 → 요약 통계.

pub mod portfolio;
pub mod runner;
pub mod simulator;

pub use portfolio::{aggregate, reindex_zero_filled, union_index, AlignedEntry, Portfolio};
pub use runner::{RunReport, RunnerConfig, SimulationRequest, SimulationRunner};
pub use simulator::schedule::{
    calendar_grid, contribution_dates, contribution_mask, period_end, period_start,
};
pub use simulator::{simulate, simulate_all, try_simulate, NO_PRICES_REASON};
