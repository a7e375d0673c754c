//! DCA 시뮬레이터 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 적립식 투자 시뮬레이션 실행 및 리포트 출력
//! - 결과 CSV/JSON 내보내기
//! - CSV Provider용 종가 데이터 다운로드

pub mod commands;
