//! 도메인 모델.
//!
//! - [`price_series`]: 종목별 일별 종가 시계열
//! - [`params`]: 검증된 시뮬레이션 매개변수
//! - [`ledger`]: 종목별 원장
//! - [`portfolio`]: 포트폴리오 원장
//! - [`drawdown`]: 고점 추적 및 낙폭 계산
//! - [`summary`]: 요약 통계

pub mod drawdown;
pub mod ledger;
pub mod params;
pub mod portfolio;
pub mod price_series;
pub mod summary;

pub use drawdown::*;
pub use ledger::*;
pub use params::*;
pub use portfolio::*;
pub use price_series::*;
pub use summary::*;
