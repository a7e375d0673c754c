//! # DCA Core
//!
//! 적립식(DCA) 투자 시뮬레이터의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시뮬레이터 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일별 종가 시계열 (`PriceSeries`)
//! - 투자 주기 (`Cadence`) 및 투자일 기준 (`ContributionAnchor`)
//! - 종목별/포트폴리오 원장 (`Ledger`, `PortfolioLedger`)
//! - 요약 통계 (총 투자금, 최종 평가금, 수익률, 최대 낙폭)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
