//! 포트폴리오 집계.

pub mod aggregator;

pub use aggregator::{aggregate, reindex_zero_filled, union_index, AlignedEntry, Portfolio};
