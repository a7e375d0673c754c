//! 시뮬레이터 전반에서 사용되는 공통 타입.

mod cadence;
mod decimal;
mod ticker;

pub use cadence::*;
pub use decimal::*;
pub use ticker::*;
