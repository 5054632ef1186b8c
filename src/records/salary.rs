//! Salary entry tracking

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tax::{CityType, TaxError, TaxInput, TaxRegime};
use crate::traits::*;
use crate::types::*;

/// Personal tax settings applied to recorded salaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub age: i32,
    pub city_type: CityType,
    pub tax_regime: TaxRegime,
}

impl Default for TaxProfile {
    fn default() -> Self {
        Self {
            age: 30,
            city_type: CityType::Metro,
            tax_regime: TaxRegime::New,
        }
    }
}

impl TaxProfile {
    /// Tax input for the annualized gross of `entry`
    pub fn input_for(&self, entry: &SalaryEntry) -> Result<TaxInput, TaxError> {
        TaxInput::builder(entry.annualized_gross())
            .age(self.age)
            .has_hra(entry.hra > BigDecimal::zero())
            .hra_monthly_amount(entry.monthly_hra())
            .city_type(self.city_type)
            .tax_regime(self.tax_regime)
            .build()
    }
}

/// Totals over a set of salary entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub entry_count: usize,
    /// Sum of each entry's gross for its own period
    pub total_gross: BigDecimal,
    pub total_benefits: BigDecimal,
    /// Mean of the entries' gross scaled to one month
    pub average_monthly_gross: BigDecimal,
}

/// Salary manager for handling salary entry operations
pub struct SalaryManager<S: RecordStorage> {
    pub(crate) storage: S,
    validator: Box<dyn SalaryEntryValidator>,
}

impl<S: RecordStorage> SalaryManager<S> {
    /// Create a new salary manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultSalaryEntryValidator),
        }
    }

    /// Create a new salary manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn SalaryEntryValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new salary entry
    pub async fn record_entry(&mut self, entry: SalaryEntry) -> RecordResult<SalaryEntry> {
        self.validator.validate_entry(&entry)?;
        self.storage.save_salary_entry(&entry).await?;
        info!(entry_id = %entry.id, date = %entry.date, "recorded salary entry");

        Ok(entry)
    }

    /// Get a salary entry by ID
    pub async fn get_entry(&self, entry_id: &str) -> RecordResult<Option<SalaryEntry>> {
        self.storage.get_salary_entry(entry_id).await
    }

    /// Get a salary entry by ID, returning an error if not found
    pub async fn get_entry_required(&self, entry_id: &str) -> RecordResult<SalaryEntry> {
        self.storage
            .get_salary_entry(entry_id)
            .await?
            .ok_or_else(|| RecordError::SalaryEntryNotFound(entry_id.to_string()))
    }

    /// List entries paid within a date range, oldest first
    pub async fn list_entries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<Vec<SalaryEntry>> {
        self.storage.list_salary_entries(start_date, end_date).await
    }

    /// Most recently paid entry
    pub async fn latest_entry(&self) -> RecordResult<Option<SalaryEntry>> {
        Ok(self.list_entries(None, None).await?.pop())
    }

    /// Update a salary entry
    pub async fn update_entry(&mut self, entry: &SalaryEntry) -> RecordResult<()> {
        self.validator.validate_entry(entry)?;
        self.storage.update_salary_entry(entry).await
    }

    /// Delete a salary entry
    pub async fn delete_entry(&mut self, entry_id: &str) -> RecordResult<()> {
        self.storage.delete_salary_entry(entry_id).await?;
        info!(entry_id, "deleted salary entry");
        Ok(())
    }

    /// Summarize entries paid within a date range
    pub async fn summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<SalarySummary> {
        let entries = self.list_entries(start_date, end_date).await?;

        let total_gross: BigDecimal = entries.iter().map(|e| e.gross()).sum();
        let total_benefits: BigDecimal = entries.iter().map(|e| &e.benefits).sum();
        let average_monthly_gross = if entries.is_empty() {
            BigDecimal::zero()
        } else {
            let monthly_total: BigDecimal = entries
                .iter()
                .map(|e| e.annualized_gross() / BigDecimal::from(12))
                .sum();
            monthly_total / BigDecimal::from(entries.len() as u64)
        };

        Ok(SalarySummary {
            entry_count: entries.len(),
            total_gross,
            total_benefits,
            average_monthly_gross,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_record_and_summarize() {
        let mut manager = SalaryManager::new(MemoryStorage::with_seed_data().unwrap());

        let mut january = SalaryEntry::new(
            generate_id(),
            date(2025, 1, 1),
            BigDecimal::from(55_000),
            BigDecimal::from(22_000),
        );
        january.allowances = BigDecimal::from(15_000);
        manager.record_entry(january.clone()).await.unwrap();

        let latest = manager.latest_entry().await.unwrap().unwrap();
        assert_eq!(latest.id, january.id);

        let summary = manager.summary(None, None).await.unwrap();
        assert_eq!(summary.entry_count, 3);
        // 95000 + 90000 + 92000
        assert_eq!(summary.total_gross, BigDecimal::from(277_000));
        assert_eq!(summary.total_benefits, BigDecimal::from(10_000));
        assert_eq!(
            summary.average_monthly_gross,
            BigDecimal::from(277_000) / BigDecimal::from(3)
        );
    }

    #[tokio::test]
    async fn test_duplicate_and_invalid_entries() {
        let mut manager = SalaryManager::new(MemoryStorage::with_seed_data().unwrap());

        let duplicate = SalaryEntry::new(
            "1".to_string(),
            date(2025, 1, 1),
            BigDecimal::from(1),
            BigDecimal::zero(),
        );
        assert!(matches!(
            manager.record_entry(duplicate).await,
            Err(RecordError::Validation(_))
        ));

        let negative = SalaryEntry::new(
            generate_id(),
            date(2025, 1, 1),
            BigDecimal::from(-1),
            BigDecimal::zero(),
        );
        assert!(manager.record_entry(negative).await.is_err());
        assert!(matches!(
            manager.get_entry_required("missing").await,
            Err(RecordError::SalaryEntryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_across_shared_storage() {
        let storage = MemoryStorage::new();
        let mut first = SalaryManager::new(storage.clone());
        let mut second = SalaryManager::new(storage);

        let entry = SalaryEntry::new(
            "2025-01".to_string(),
            date(2025, 1, 1),
            BigDecimal::from(60_000),
            BigDecimal::from(20_000),
        );
        first.record_entry(entry.clone()).await.unwrap();

        assert!(matches!(
            second.record_entry(entry).await,
            Err(RecordError::Validation(_))
        ));
        assert_eq!(second.list_entries(None, None).await.unwrap().len(), 1);
    }

    #[test]
    fn test_profile_builds_annual_input() {
        let entry = &crate::utils::seed_salary_entries()[0];
        let input = TaxProfile::default().input_for(entry).unwrap();

        assert_eq!(input.annual_salary, BigDecimal::from(1_140_000));
        assert!(input.has_hra);
        assert_eq!(input.hra_monthly_amount, BigDecimal::from(20_000));
        assert_eq!(input.tax_regime, TaxRegime::New);
    }
}
