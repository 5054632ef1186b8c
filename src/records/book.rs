//! Payroll book that coordinates salary entries, goals and the tax engine

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{
    CompanyInfo, EmployeeInfo, GoalManager, PayPeriod, Payslip, PayslipGenerator, SalaryManager,
    SalarySummary, TaxProfile,
};
use crate::tax::{RegimeComparison, TaxEngine, TaxInput, TaxRegime, TaxResult};
use crate::traits::*;
use crate::types::*;

/// Whether a dashboard line is paid by the employee or received on top of salary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitKind {
    Deduction,
    Benefit,
}

/// Monthly benefit or statutory deduction shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitLine {
    pub name: String,
    pub monthly_amount: BigDecimal,
    pub kind: BenefitKind,
}

impl BenefitLine {
    fn new(name: &str, monthly_amount: BigDecimal, kind: BenefitKind) -> Self {
        Self {
            name: name.to_string(),
            monthly_amount,
            kind,
        }
    }
}

/// Snapshot shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Annualized gross of the latest salary entry
    pub current_salary: BigDecimal,
    /// Tax breakdown for the latest salary entry, if any entry exists
    pub tax: Option<TaxResult>,
    pub monthly_take_home: BigDecimal,
    pub annual_take_home: BigDecimal,
    /// Annual saving of the recommended regime over the other one
    pub tax_saved: BigDecimal,
    /// EPF, professional tax and employer benefits of the latest entry; zero lines omitted
    pub benefits: Vec<BenefitLine>,
    /// Up to three most recent salary entries, newest first
    pub recent_entries: Vec<SalaryEntry>,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub overdue_goals: usize,
}

/// Main payroll system that orchestrates salary, goal and tax operations
pub struct PayrollBook<S: RecordStorage> {
    salary_manager: SalaryManager<S>,
    goal_manager: GoalManager<S>,
    engine: TaxEngine,
    profile: TaxProfile,
}

impl<S: RecordStorage + Clone> PayrollBook<S> {
    /// Create a new payroll book with the given storage backend
    pub fn new(storage: S) -> Self {
        Self::with_engine(storage, TaxEngine::new(), TaxProfile::default())
    }

    /// Create a new payroll book with a custom engine and tax profile
    pub fn with_engine(storage: S, engine: TaxEngine, profile: TaxProfile) -> Self {
        Self {
            salary_manager: SalaryManager::new(storage.clone()),
            goal_manager: GoalManager::new(storage),
            engine,
            profile,
        }
    }

    /// Create a new payroll book with custom validators
    pub fn with_validators(
        storage: S,
        salary_validator: Box<dyn SalaryEntryValidator>,
        goal_validator: Box<dyn GoalValidator>,
    ) -> Self {
        Self {
            salary_manager: SalaryManager::with_validator(storage.clone(), salary_validator),
            goal_manager: GoalManager::with_validator(storage, goal_validator),
            engine: TaxEngine::new(),
            profile: TaxProfile::default(),
        }
    }

    pub fn profile(&self) -> &TaxProfile {
        &self.profile
    }

    /// Change the age, city or regime used for recorded salaries
    pub fn set_profile(&mut self, profile: TaxProfile) {
        self.profile = profile;
    }

    // Salary operations
    /// Record a new salary entry
    pub async fn record_salary(&mut self, entry: SalaryEntry) -> RecordResult<SalaryEntry> {
        self.salary_manager.record_entry(entry).await
    }

    /// Get a salary entry by ID
    pub async fn get_salary(&self, entry_id: &str) -> RecordResult<Option<SalaryEntry>> {
        self.salary_manager.get_entry(entry_id).await
    }

    /// List salary entries within a date range
    pub async fn list_salaries(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<Vec<SalaryEntry>> {
        self.salary_manager.list_entries(start_date, end_date).await
    }

    /// Delete a salary entry
    pub async fn delete_salary(&mut self, entry_id: &str) -> RecordResult<()> {
        self.salary_manager.delete_entry(entry_id).await
    }

    /// Summarize salary entries within a date range
    pub async fn salary_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> RecordResult<SalarySummary> {
        self.salary_manager.summary(start_date, end_date).await
    }

    // Goal operations
    /// Create a new goal
    pub async fn create_goal(
        &mut self,
        title: String,
        target_amount: BigDecimal,
        current_amount: BigDecimal,
        deadline: NaiveDate,
    ) -> RecordResult<Goal> {
        self.goal_manager
            .create_goal(title, target_amount, current_amount, deadline)
            .await
    }

    /// List all goals
    pub async fn list_goals(&self) -> RecordResult<Vec<Goal>> {
        self.goal_manager.list_goals().await
    }

    /// Add to a goal's saved amount
    pub async fn contribute_to_goal(
        &mut self,
        goal_id: &str,
        amount: &BigDecimal,
    ) -> RecordResult<Goal> {
        self.goal_manager.contribute(goal_id, amount).await
    }

    /// Delete a goal
    pub async fn delete_goal(&mut self, goal_id: &str) -> RecordResult<()> {
        self.goal_manager.delete_goal(goal_id).await
    }

    // Tax operations
    /// Calculate tax for an arbitrary input
    pub fn calculate_tax(&self, input: &TaxInput) -> RecordResult<TaxResult> {
        Ok(self.engine.calculate(input)?)
    }

    /// Calculate tax for a recorded salary entry under the current profile
    pub async fn tax_for_salary(&self, entry_id: &str) -> RecordResult<TaxResult> {
        let entry = self.salary_manager.get_entry_required(entry_id).await?;
        let input = self.profile.input_for(&entry)?;
        Ok(self.engine.calculate(&input)?)
    }

    /// Compare both regimes for a recorded salary entry
    pub async fn compare_regimes_for_salary(
        &self,
        entry_id: &str,
    ) -> RecordResult<RegimeComparison> {
        let entry = self.salary_manager.get_entry_required(entry_id).await?;
        let input = self.profile.input_for(&entry)?;
        Ok(self.engine.compare_regimes(&input)?)
    }

    /// Generate a monthly payslip for a recorded salary entry
    pub async fn generate_payslip(
        &self,
        entry_id: &str,
        employee: EmployeeInfo,
        company: CompanyInfo,
        period: PayPeriod,
    ) -> RecordResult<Payslip> {
        let entry = self.salary_manager.get_entry_required(entry_id).await?;
        PayslipGenerator::new(self.engine.clone(), self.profile)
            .generate(employee, company, period, &entry)
    }

    /// Build the dashboard snapshot as of `today`
    pub async fn dashboard(&self, today: NaiveDate) -> RecordResult<DashboardSummary> {
        let mut entries = self.salary_manager.list_entries(None, None).await?;
        entries.reverse();

        let twelve = BigDecimal::from(12);
        let mut tax = None;
        let mut tax_saved = BigDecimal::zero();
        let mut benefits = Vec::new();
        if let Some(latest) = entries.first() {
            let input = self.profile.input_for(latest)?;
            let comparison = self.engine.compare_regimes(&input)?;
            let result = match input.tax_regime {
                TaxRegime::New => comparison.new_regime,
                TaxRegime::Old => comparison.old_regime,
            };

            let employer_benefits =
                &latest.benefits * BigDecimal::from(latest.period.periods_per_year()) / &twelve;
            benefits = vec![
                BenefitLine::new(
                    "EPF Contribution",
                    &result.epf / &twelve,
                    BenefitKind::Deduction,
                ),
                BenefitLine::new("Employer Benefits", employer_benefits, BenefitKind::Benefit),
                BenefitLine::new(
                    "Professional Tax",
                    &result.professional_tax / &twelve,
                    BenefitKind::Deduction,
                ),
            ];
            benefits.retain(|line| !line.monthly_amount.is_zero());

            tax_saved = comparison.annual_savings;
            tax = Some(result);
        }

        let (current_salary, annual_take_home, monthly_take_home) = match &tax {
            Some(result) => (
                result.gross_salary.clone(),
                result.net_salary.clone(),
                result.monthly_net.clone(),
            ),
            None => (BigDecimal::zero(), BigDecimal::zero(), BigDecimal::zero()),
        };

        let goals = self.goal_manager.list_goals().await?;
        let completed_goals = goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::Completed)
            .count();
        let overdue_goals = goals.iter().filter(|goal| goal.is_overdue(today)).count();

        entries.truncate(3);

        Ok(DashboardSummary {
            current_salary,
            tax,
            monthly_take_home,
            annual_take_home,
            tax_saved,
            benefits,
            recent_entries: entries,
            active_goals: goals.len() - completed_goals,
            completed_goals,
            overdue_goals,
        })
    }
}
