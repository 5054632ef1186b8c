//! Salary, goal and payslip records built on top of the tax engine

pub mod book;
pub mod goals;
pub mod payslip;
pub mod salary;

pub use book::*;
pub use goals::*;
pub use payslip::*;
pub use salary::*;
