//! 정밀한 금융 계산을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;

/// 종가 타입.
pub type Price = Decimal;

/// 투자 금액 타입.
pub type Amount = Decimal;

/// 보유 주식 수 (소수점 단위 매수 허용).
pub type Shares = Decimal;

/// 비율 타입 (0.01 = 1%).
pub type Ratio = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 퍼센트 문자열로 변환합니다 (예: "5.25%").
    fn to_percentage_string(&self) -> String;

    /// 천 단위 구분 기호가 포함된 금액 문자열로 변환합니다 (예: "$1,050.00").
    fn to_currency_string(&self) -> String;

    /// 0으로 나누기를 0으로 처리하는 나눗셈.
    fn div_or_zero(&self, rhs: Decimal) -> Decimal;
}

impl DecimalExt for Decimal {
    fn to_percentage_string(&self) -> String {
        let pct = *self * Decimal::ONE_HUNDRED;
        format!("{:.2}%", pct)
    }

    fn to_currency_string(&self) -> String {
        let rounded = self.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("{}${}.{}", if negative { "-" } else { "" }, grouped, frac_part)
    }

    fn div_or_zero(&self, rhs: Decimal) -> Decimal {
        self.checked_div(rhs).unwrap_or(Decimal::ZERO)
    }
}
