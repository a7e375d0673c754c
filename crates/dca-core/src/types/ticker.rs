//! 종목 티커 입력 파싱.

use crate::error::DcaError;

/// 콤마로 구분된 티커 입력을 파싱합니다.
///
/// 공백을 제거하고 대문자로 변환하며, 빈 항목은 무시합니다.
/// 중복 티커는 처음 등장한 순서대로 한 번만 남깁니다.
///
/// # 예제
///
/// ```
/// use dca_core::parse_tickers;
///
/// let tickers = parse_tickers(" spy, aapl,,SPY ").unwrap();
/// assert_eq!(tickers, vec!["SPY".to_string(), "AAPL".to_string()]);
/// ```
pub fn parse_tickers(input: &str) -> Result<Vec<String>, DcaError> {
    let mut tickers: Vec<String> = Vec::new();

    for raw in input.split(',') {
        let ticker = raw.trim().to_uppercase();
        if ticker.is_empty() || tickers.contains(&ticker) {
            continue;
        }
        tickers.push(ticker);
    }

    if tickers.is_empty() {
        return Err(DcaError::InvalidParameters(
            "At least one ticker is required".to_string(),
        ));
    }

    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tickers_trims_and_uppercases() {
        let tickers = parse_tickers("spy,  msft , Aapl").unwrap();
        assert_eq!(tickers, vec!["SPY", "MSFT", "AAPL"]);
    }

    #[test]
    fn test_parse_tickers_rejects_blank_input() {
        assert!(parse_tickers("").is_err());
        assert!(parse_tickers(" , ,").is_err());
    }

    #[test]
    fn test_parse_tickers_korean_codes() {
        let tickers = parse_tickers("005930.KS, 069500.ks").unwrap();
        assert_eq!(tickers, vec!["005930.KS", "069500.KS"]);
    }
}
