//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for salary entries and goals
///
/// The tax engine never touches this; it is the record layer's only way to
/// reach shared state, so any backend (SQL, key-value, in-memory) can be
/// injected by implementing these methods.
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Save a new salary entry; an existing ID is a validation error
    async fn save_salary_entry(&mut self, entry: &SalaryEntry) -> RecordResult<()>;

    /// Get a salary entry by ID
    async fn get_salary_entry(&self, entry_id: &str) -> RecordResult<Option<SalaryEntry>>;

    /// List salary entries paid within a date range, oldest first
    async fn list_salary_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<Vec<SalaryEntry>>;

    /// Update an existing salary entry
    async fn update_salary_entry(&mut self, entry: &SalaryEntry) -> RecordResult<()>;

    /// Delete a salary entry
    async fn delete_salary_entry(&mut self, entry_id: &str) -> RecordResult<()>;

    /// Save a new goal; an existing ID is a validation error
    async fn save_goal(&mut self, goal: &Goal) -> RecordResult<()>;

    /// Get a goal by ID
    async fn get_goal(&self, goal_id: &str) -> RecordResult<Option<Goal>>;

    /// List goals, optionally filtered by status, earliest deadline first
    async fn list_goals(&self, status: Option<GoalStatus>) -> RecordResult<Vec<Goal>>;

    /// Update an existing goal
    async fn update_goal(&mut self, goal: &Goal) -> RecordResult<()>;

    /// Delete a goal
    async fn delete_goal(&mut self, goal_id: &str) -> RecordResult<()>;
}

/// Trait for implementing custom salary entry validation rules
pub trait SalaryEntryValidator: Send + Sync {
    /// Validate an entry before saving
    fn validate_entry(&self, entry: &SalaryEntry) -> RecordResult<()>;
}

/// Trait for implementing custom goal validation rules
pub trait GoalValidator: Send + Sync {
    /// Validate a goal before saving
    fn validate_goal(&self, goal: &Goal) -> RecordResult<()>;
}

/// Default salary entry validator: non-empty ID, no negative component
pub struct DefaultSalaryEntryValidator;

impl SalaryEntryValidator for DefaultSalaryEntryValidator {
    fn validate_entry(&self, entry: &SalaryEntry) -> RecordResult<()> {
        if entry.id.trim().is_empty() {
            return Err(RecordError::Validation(
                "Salary entry ID cannot be empty".to_string(),
            ));
        }

        for (name, amount) in entry.components() {
            if *amount < BigDecimal::zero() {
                return Err(RecordError::Validation(format!(
                    "Salary component '{}' cannot be negative",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Default goal validator: non-empty ID and title, positive target
pub struct DefaultGoalValidator;

impl GoalValidator for DefaultGoalValidator {
    fn validate_goal(&self, goal: &Goal) -> RecordResult<()> {
        if goal.id.trim().is_empty() {
            return Err(RecordError::Validation(
                "Goal ID cannot be empty".to_string(),
            ));
        }

        if goal.title.trim().is_empty() {
            return Err(RecordError::Validation(
                "Goal title cannot be empty".to_string(),
            ));
        }

        if goal.target_amount <= BigDecimal::zero() {
            return Err(RecordError::Validation(
                "Goal target amount must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
