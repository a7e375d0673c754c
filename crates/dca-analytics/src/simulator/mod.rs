//! 단일 종목 시뮬레이터.
//!
//! - [`schedule`]: 투자 주기에 따른 투자일 선택
//! - [`engine`]: 종가 시계열 → 원장 계산

pub mod engine;
pub mod schedule;

pub use engine::{simulate, simulate_all, try_simulate, NO_PRICES_REASON};
