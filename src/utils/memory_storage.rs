//! In-memory storage implementation for testing and demos

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    salary_entries: Arc<RwLock<HashMap<String, SalaryEntry>>>,
    goals: Arc<RwLock<HashMap<String, Goal>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> RecordError {
    RecordError::Storage("memory storage lock poisoned".to_string())
}

impl MemoryStorage {
    /// Create a new, empty memory storage instance
    pub fn new() -> Self {
        Self {
            salary_entries: Arc::new(RwLock::new(HashMap::new())),
            goals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a storage instance preloaded with sample salary entries and goals
    pub fn with_seed_data() -> RecordResult<Self> {
        let storage = Self::new();
        {
            let mut entries = storage.salary_entries.write().map_err(poisoned)?;
            for entry in seed_salary_entries() {
                entries.insert(entry.id.clone(), entry);
            }
            let mut goals = storage.goals.write().map_err(poisoned)?;
            for goal in seed_goals() {
                goals.insert(goal.id.clone(), goal);
            }
        }
        Ok(storage)
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> RecordResult<()> {
        self.salary_entries.write().map_err(poisoned)?.clear();
        self.goals.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Two monthly salary entries for November and December 2024
pub fn seed_salary_entries() -> Vec<SalaryEntry> {
    let mut december = SalaryEntry::new(
        "1".to_string(),
        seed_date(2024, 12, 1),
        BigDecimal::from(50_000),
        BigDecimal::from(20_000),
    );
    december.allowances = BigDecimal::from(15_000);
    december.bonuses = BigDecimal::from(10_000);
    december.benefits = BigDecimal::from(5_000);

    let mut november = SalaryEntry::new(
        "2".to_string(),
        seed_date(2024, 11, 1),
        BigDecimal::from(50_000),
        BigDecimal::from(20_000),
    );
    november.allowances = BigDecimal::from(15_000);
    november.overtime = BigDecimal::from(5_000);
    november.benefits = BigDecimal::from(5_000);

    vec![december, november]
}

/// A salary target and an emergency fund, both in progress
pub fn seed_goals() -> Vec<Goal> {
    vec![
        Goal::new(
            "1".to_string(),
            "Reach ₹15 LPA Salary".to_string(),
            BigDecimal::from(1_500_000),
            BigDecimal::from(1_200_000),
            seed_date(2025, 6, 1),
        ),
        Goal::new(
            "2".to_string(),
            "Emergency Fund".to_string(),
            BigDecimal::from(500_000),
            BigDecimal::from(350_000),
            seed_date(2025, 12, 31),
        ),
    ]
}

#[async_trait]
impl RecordStorage for MemoryStorage {
    async fn save_salary_entry(&mut self, entry: &SalaryEntry) -> RecordResult<()> {
        let mut entries = self.salary_entries.write().map_err(poisoned)?;
        match entries.entry(entry.id.clone()) {
            Entry::Occupied(_) => Err(RecordError::Validation(format!(
                "Salary entry with ID '{}' already exists",
                entry.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(())
            }
        }
    }

    async fn get_salary_entry(&self, entry_id: &str) -> RecordResult<Option<SalaryEntry>> {
        Ok(self
            .salary_entries
            .read()
            .map_err(poisoned)?
            .get(entry_id)
            .cloned())
    }

    async fn list_salary_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<Vec<SalaryEntry>> {
        let entries = self.salary_entries.read().map_err(poisoned)?;
        let mut filtered: Vec<SalaryEntry> = entries
            .values()
            .filter(|entry| {
                let after_start = start_date.is_none_or(|start| entry.date >= start);
                let before_end = end_date.is_none_or(|end| entry.date <= end);
                after_start && before_end
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn update_salary_entry(&mut self, entry: &SalaryEntry) -> RecordResult<()> {
        let mut entries = self.salary_entries.write().map_err(poisoned)?;
        match entries.get_mut(&entry.id) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(())
            }
            None => Err(RecordError::SalaryEntryNotFound(entry.id.clone())),
        }
    }

    async fn delete_salary_entry(&mut self, entry_id: &str) -> RecordResult<()> {
        if self
            .salary_entries
            .write()
            .map_err(poisoned)?
            .remove(entry_id)
            .is_some()
        {
            Ok(())
        } else {
            Err(RecordError::SalaryEntryNotFound(entry_id.to_string()))
        }
    }

    async fn save_goal(&mut self, goal: &Goal) -> RecordResult<()> {
        let mut goals = self.goals.write().map_err(poisoned)?;
        match goals.entry(goal.id.clone()) {
            Entry::Occupied(_) => Err(RecordError::Validation(format!(
                "Goal with ID '{}' already exists",
                goal.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(goal.clone());
                Ok(())
            }
        }
    }

    async fn get_goal(&self, goal_id: &str) -> RecordResult<Option<Goal>> {
        Ok(self.goals.read().map_err(poisoned)?.get(goal_id).cloned())
    }

    async fn list_goals(&self, status: Option<GoalStatus>) -> RecordResult<Vec<Goal>> {
        let goals = self.goals.read().map_err(poisoned)?;
        let mut filtered: Vec<Goal> = goals
            .values()
            .filter(|goal| status.is_none_or(|s| goal.status == s))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn update_goal(&mut self, goal: &Goal) -> RecordResult<()> {
        let mut goals = self.goals.write().map_err(poisoned)?;
        match goals.get_mut(&goal.id) {
            Some(existing) => {
                *existing = goal.clone();
                Ok(())
            }
            None => Err(RecordError::GoalNotFound(goal.id.clone())),
        }
    }

    async fn delete_goal(&mut self, goal_id: &str) -> RecordResult<()> {
        if self.goals.write().map_err(poisoned)?.remove(goal_id).is_some() {
            Ok(())
        } else {
            Err(RecordError::GoalNotFound(goal_id.to_string()))
        }
    }
}
