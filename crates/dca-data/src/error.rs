//! 데이터 모듈 오류 타입.

use dca_core::DcaError;
use thiserror::Error;

/// 데이터 관련 오류.
///
/// 시뮬레이션 관점에서는 모든 변형이 해당 종목의 "데이터 없음"으로
/// 취급되며, 메시지는 종목별 경고에 그대로 표시됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 외부 소스 요청 실패
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 종목 또는 데이터를 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 응답/파일 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 타임아웃
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(String),
}

impl DataError {
    /// 재시도하면 성공할 가능성이 있는 오류인지 확인합니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataError::FetchError(_) | DataError::Timeout(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(err.to_string()),
            _ => DataError::Io(err.to_string()),
        }
    }
}

impl From<DcaError> for DataError {
    fn from(err: DcaError) -> Self {
        DataError::InvalidData(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
