//! Financial goal tracking

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use tracing::info;

use crate::traits::*;
use crate::types::*;

/// Goal manager for handling goal operations
pub struct GoalManager<S: RecordStorage> {
    pub(crate) storage: S,
    validator: Box<dyn GoalValidator>,
}

impl<S: RecordStorage> GoalManager<S> {
    /// Create a new goal manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultGoalValidator),
        }
    }

    /// Create a new goal manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn GoalValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new goal with a generated ID
    pub async fn create_goal(
        &mut self,
        title: String,
        target_amount: BigDecimal,
        current_amount: BigDecimal,
        deadline: NaiveDate,
    ) -> RecordResult<Goal> {
        let mut goal = Goal::new(generate_id(), title, target_amount, current_amount, deadline);
        if goal.current_amount >= goal.target_amount {
            goal.status = GoalStatus::Completed;
        }

        self.validator.validate_goal(&goal)?;
        self.storage.save_goal(&goal).await?;
        info!(goal_id = %goal.id, title = %goal.title, "created goal");

        Ok(goal)
    }

    /// Get a goal by ID
    pub async fn get_goal(&self, goal_id: &str) -> RecordResult<Option<Goal>> {
        self.storage.get_goal(goal_id).await
    }

    /// Get a goal by ID, returning an error if not found
    pub async fn get_goal_required(&self, goal_id: &str) -> RecordResult<Goal> {
        self.storage
            .get_goal(goal_id)
            .await?
            .ok_or_else(|| RecordError::GoalNotFound(goal_id.to_string()))
    }

    /// List all goals, earliest deadline first
    pub async fn list_goals(&self) -> RecordResult<Vec<Goal>> {
        self.storage.list_goals(None).await
    }

    /// List goals in a given state
    pub async fn list_goals_by_status(&self, status: GoalStatus) -> RecordResult<Vec<Goal>> {
        self.storage.list_goals(Some(status)).await
    }

    /// Goals past their deadline that are not completed
    pub async fn overdue_goals(&self, today: NaiveDate) -> RecordResult<Vec<Goal>> {
        Ok(self
            .list_goals()
            .await?
            .into_iter()
            .filter(|goal| goal.is_overdue(today))
            .collect())
    }

    /// Add a positive amount to a goal's saved total
    pub async fn contribute(&mut self, goal_id: &str, amount: &BigDecimal) -> RecordResult<Goal> {
        if *amount <= BigDecimal::zero() {
            return Err(RecordError::Validation(
                "Contribution must be positive".to_string(),
            ));
        }

        let mut goal = self.get_goal_required(goal_id).await?;
        goal.contribute(amount);
        self.storage.update_goal(&goal).await?;

        if goal.status == GoalStatus::Completed {
            info!(goal_id, "goal completed");
        }

        Ok(goal)
    }

    /// Update a goal
    pub async fn update_goal(&mut self, goal: &Goal) -> RecordResult<()> {
        self.validator.validate_goal(goal)?;
        self.storage.update_goal(goal).await
    }

    /// Delete a goal
    pub async fn delete_goal(&mut self, goal_id: &str) -> RecordResult<()> {
        self.storage.delete_goal(goal_id).await
    }
}
