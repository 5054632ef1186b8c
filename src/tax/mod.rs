//! Indian income tax engine
//!
//! One engine serves both the new and the old regime. The regime only picks
//! the slab table; HRA exemption, standard deduction, statutory deductions
//! and cess are applied identically.

pub mod config;
pub mod engine;
pub mod hra;
pub mod input;
pub mod slabs;
pub mod statutory;

use bigdecimal::{num_bigint::BigInt, BigDecimal};

pub use config::*;
pub use engine::*;
pub use hra::*;
pub use input::*;
pub use slabs::*;
pub use statutory::*;

/// Build an exact decimal from an integer mantissa and a scale,
/// e.g. `decimal(75, 4)` is `0.0075`.
pub(crate) fn decimal(digits: i64, scale: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(digits), scale)
}

/// Income tax errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaxError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Calculation error: {0}")]
    Calculation(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_is_exact() {
        assert_eq!(decimal(75, 4), "0.0075".parse::<BigDecimal>().unwrap());
        assert_eq!(decimal(12, 1) * BigDecimal::from(10), BigDecimal::from(12));
    }
}
