//! Core types for salary and goal tracking

use bigdecimal::{BigDecimal, Zero};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::tax::TaxError;

/// Fresh random identifier for a new record
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Currency a record is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee
    #[default]
    Inr,
    /// US Dollar
    Usd,
}

/// How often a salary entry's amounts are paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    #[default]
    Monthly,
    Yearly,
}

impl PayFrequency {
    /// Number of pay periods in a year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PayFrequency::Monthly => 12,
            PayFrequency::Yearly => 1,
        }
    }
}

/// One recorded salary, broken into its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryEntry {
    /// Unique identifier for the entry
    pub id: String,
    /// Basic pay
    pub base_salary: BigDecimal,
    /// House Rent Allowance
    pub hra: BigDecimal,
    /// Conveyance, medical, special and other allowances
    pub allowances: BigDecimal,
    pub bonuses: BigDecimal,
    pub overtime: BigDecimal,
    /// Employer-provided benefits, recorded but not part of gross pay
    pub benefits: BigDecimal,
    /// Period the amounts cover
    pub period: PayFrequency,
    /// Date the salary was paid
    pub date: NaiveDate,
    pub currency: Currency,
    /// When the entry was recorded
    pub created_at: NaiveDateTime,
}

impl SalaryEntry {
    /// Create a monthly entry with only basic pay and HRA set
    pub fn new(id: String, date: NaiveDate, base_salary: BigDecimal, hra: BigDecimal) -> Self {
        Self {
            id,
            base_salary,
            hra,
            allowances: BigDecimal::zero(),
            bonuses: BigDecimal::zero(),
            overtime: BigDecimal::zero(),
            benefits: BigDecimal::zero(),
            period: PayFrequency::Monthly,
            date,
            currency: Currency::Inr,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Gross pay for the entry's period
    pub fn gross(&self) -> BigDecimal {
        &self.base_salary + &self.hra + &self.allowances + &self.bonuses + &self.overtime
    }

    /// Gross pay scaled to a full year
    pub fn annualized_gross(&self) -> BigDecimal {
        self.gross() * BigDecimal::from(self.period.periods_per_year())
    }

    /// HRA scaled to one month
    pub fn monthly_hra(&self) -> BigDecimal {
        match self.period {
            PayFrequency::Monthly => self.hra.clone(),
            PayFrequency::Yearly => &self.hra / BigDecimal::from(12),
        }
    }

    /// All monetary components, named, for validation and display
    pub fn components(&self) -> [(&'static str, &BigDecimal); 6] {
        [
            ("base_salary", &self.base_salary),
            ("hra", &self.hra),
            ("allowances", &self.allowances),
            ("bonuses", &self.bonuses),
            ("overtime", &self.overtime),
            ("benefits", &self.benefits),
        ]
    }
}

/// Progress state of a savings or salary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Pending,
    #[default]
    InProgress,
    Completed,
}

/// A financial goal with a target amount and deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: String,
    pub title: String,
    pub target_amount: BigDecimal,
    pub current_amount: BigDecimal,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
    pub currency: Currency,
    /// When the goal was created
    pub created_at: NaiveDateTime,
    /// When the goal was last updated
    pub updated_at: NaiveDateTime,
}

impl Goal {
    /// Create a new in-progress goal
    pub fn new(
        id: String,
        title: String,
        target_amount: BigDecimal,
        current_amount: BigDecimal,
        deadline: NaiveDate,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id,
            title,
            target_amount,
            current_amount,
            deadline,
            status: GoalStatus::InProgress,
            currency: Currency::Inr,
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress towards the target in percent, capped at 100
    pub fn progress_percentage(&self) -> BigDecimal {
        if self.target_amount <= BigDecimal::zero() {
            return BigDecimal::from(100);
        }
        let progress = &self.current_amount * BigDecimal::from(100) / &self.target_amount;
        progress.min(BigDecimal::from(100))
    }

    /// Amount still needed, never negative
    pub fn remaining(&self) -> BigDecimal {
        (&self.target_amount - &self.current_amount).max(BigDecimal::zero())
    }

    /// Past its deadline without being completed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline < today && self.status != GoalStatus::Completed
    }

    /// Add `amount` to the saved total, completing the goal once the target is reached
    pub fn contribute(&mut self, amount: &BigDecimal) {
        self.current_amount += amount;
        if self.current_amount >= self.target_amount {
            self.status = GoalStatus::Completed;
        } else if self.status == GoalStatus::Pending {
            self.status = GoalStatus::InProgress;
        }
        self.updated_at = chrono::Utc::now().naive_utc();
    }
}

/// Errors that can occur in the record layer
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Salary entry not found: {0}")]
    SalaryEntryNotFound(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Tax(#[from] TaxError),
}

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;
