//! Validation utilities

use bigdecimal::{BigDecimal, Zero};

use crate::traits::*;
use crate::types::*;

/// Validate that an amount is not negative
pub fn validate_non_negative_amount(name: &str, amount: &BigDecimal) -> RecordResult<()> {
    if *amount < BigDecimal::zero() {
        Err(RecordError::Validation(format!(
            "{} cannot be negative",
            name
        )))
    } else {
        Ok(())
    }
}

/// Validate that a record ID is valid
pub fn validate_record_id(record_id: &str) -> RecordResult<()> {
    if record_id.trim().is_empty() {
        return Err(RecordError::Validation(
            "Record ID cannot be empty".to_string(),
        ));
    }

    if record_id.len() > 50 {
        return Err(RecordError::Validation(
            "Record ID cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !record_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RecordError::Validation(
            "Record ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that a goal title is valid
pub fn validate_goal_title(title: &str) -> RecordResult<()> {
    if title.trim().is_empty() {
        return Err(RecordError::Validation(
            "Goal title cannot be empty".to_string(),
        ));
    }

    if title.chars().count() > 100 {
        return Err(RecordError::Validation(
            "Goal title cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced salary entry validator with detailed checks
pub struct EnhancedSalaryEntryValidator;

impl SalaryEntryValidator for EnhancedSalaryEntryValidator {
    fn validate_entry(&self, entry: &SalaryEntry) -> RecordResult<()> {
        validate_record_id(&entry.id)?;

        for (name, amount) in entry.components() {
            validate_non_negative_amount(name, amount)?;
        }

        if entry.base_salary.is_zero() {
            return Err(RecordError::Validation(
                "Base salary must be recorded".to_string(),
            ));
        }

        if entry.hra > entry.base_salary {
            return Err(RecordError::Validation(format!(
                "HRA {} exceeds base salary {}",
                entry.hra, entry.base_salary
            )));
        }

        Ok(())
    }
}

/// Enhanced goal validator with detailed checks
pub struct EnhancedGoalValidator;

impl GoalValidator for EnhancedGoalValidator {
    fn validate_goal(&self, goal: &Goal) -> RecordResult<()> {
        DefaultGoalValidator.validate_goal(goal)?;
        validate_record_id(&goal.id)?;
        validate_goal_title(&goal.title)?;
        validate_non_negative_amount("Current amount", &goal.current_amount)?;

        if goal.status == GoalStatus::Completed && goal.current_amount < goal.target_amount {
            return Err(RecordError::Validation(format!(
                "Goal '{}' cannot be completed below its target",
                goal.title
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry() -> SalaryEntry {
        SalaryEntry::new(
            "salary-1".to_string(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            BigDecimal::from(50_000),
            BigDecimal::from(20_000),
        )
    }

    #[test]
    fn test_record_id_rules() {
        assert!(validate_record_id("goal_1").is_ok());
        assert!(validate_record_id("  ").is_err());
        assert!(validate_record_id("goal 1").is_err());
        assert!(validate_record_id(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_enhanced_salary_validator() {
        let validator = EnhancedSalaryEntryValidator;
        assert!(validator.validate_entry(&entry()).is_ok());

        let mut negative = entry();
        negative.overtime = BigDecimal::from(-1);
        assert!(validator.validate_entry(&negative).is_err());

        let mut inflated_hra = entry();
        inflated_hra.hra = BigDecimal::from(60_000);
        assert!(validator.validate_entry(&inflated_hra).is_err());
    }

    #[test]
    fn test_enhanced_goal_validator() {
        let validator = EnhancedGoalValidator;
        let mut goal = Goal::new(
            "goal-1".to_string(),
            "Emergency Fund".to_string(),
            BigDecimal::from(500_000),
            BigDecimal::from(350_000),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        );
        assert!(validator.validate_goal(&goal).is_ok());

        goal.status = GoalStatus::Completed;
        assert!(validator.validate_goal(&goal).is_err());
    }
}
