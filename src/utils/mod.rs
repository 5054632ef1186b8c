//! Utility modules

pub mod currency;
pub mod memory_storage;
pub mod validation;

pub use currency::*;
pub use memory_storage::*;
pub use validation::*;
