//! # Salary Core
//!
//! Indian income tax and take-home pay calculation for salaried employees,
//! with salary history, payslips and financial goal tracking.
//!
//! ## Features
//!
//! - **Income tax**: New and old regime slab tables with 4% health and education cess
//! - **HRA exemption**: Smallest of HRA received, rent over 10% of basic, and the city share of basic
//! - **Statutory deductions**: EPF, ESI and professional tax
//! - **Regime comparison**: Side-by-side totals with a recommended regime
//! - **Records**: Salary entries, payslips and goals behind a storage trait
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use salary_core::{TaxEngine, TaxInput, TaxRegime};
//!
//! let input = TaxInput::builder(BigDecimal::from(1_200_000))
//!     .has_hra(false)
//!     .tax_regime(TaxRegime::New)
//!     .build()
//!     .unwrap();
//!
//! let result = TaxEngine::new().calculate(&input).unwrap();
//! assert_eq!(result.taxable_income, BigDecimal::from(1_150_000));
//! ```

pub mod records;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use records::*;
pub use tax::*;
pub use traits::*;
pub use types::*;
