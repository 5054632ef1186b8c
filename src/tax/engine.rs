//! Tax engine: turns a [`TaxInput`] into a [`TaxResult`]

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{FiscalYearConfig, TaxError, TaxInput, TaxRegime, TaxRequest};

/// Full breakdown of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Regime the slabs were taken from
    pub tax_regime: TaxRegime,
    pub gross_salary: BigDecimal,
    pub standard_deduction: BigDecimal,
    pub hra_exemption: BigDecimal,
    pub taxable_income: BigDecimal,
    /// Slab tax before cess
    pub income_tax: BigDecimal,
    pub cess: BigDecimal,
    pub epf: BigDecimal,
    pub esi: BigDecimal,
    pub professional_tax: BigDecimal,
    /// income tax + cess + EPF + ESI + professional tax
    pub total_deductions: BigDecimal,
    /// Gross less total deductions; negative when deductions exceed salary
    pub net_salary: BigDecimal,
    pub monthly_net: BigDecimal,
    /// Label of the bracket the taxable income falls into
    pub tax_slab_description: String,
}

impl TaxResult {
    /// Income tax including cess
    pub fn total_income_tax(&self) -> BigDecimal {
        &self.income_tax + &self.cess
    }

    /// `amount` as a percentage of gross salary; zero when gross is zero
    pub fn percentage_of_gross(&self, amount: &BigDecimal) -> BigDecimal {
        if self.gross_salary.is_zero() {
            return BigDecimal::zero();
        }
        amount * BigDecimal::from(100) / &self.gross_salary
    }

    /// Total deductions as a percentage of gross salary
    pub fn effective_deduction_rate(&self) -> BigDecimal {
        self.percentage_of_gross(&self.total_deductions)
    }
}

/// Both regimes computed for the same input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxResult,
    pub old_regime: TaxResult,
    /// Regime with the lower total deductions; new on a tie
    pub recommended: TaxRegime,
    /// Difference in total deductions between the two regimes
    pub annual_savings: BigDecimal,
}

/// Income tax engine for one fiscal year.
///
/// Holds only immutable configuration, so one engine can be shared across
/// threads and every call is independent.
#[derive(Debug, Clone, Default)]
pub struct TaxEngine {
    config: FiscalYearConfig,
}

impl TaxEngine {
    /// Create an engine with the built-in FY 2023-24 constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a custom configuration
    pub fn with_config(config: FiscalYearConfig) -> Result<Self, TaxError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FiscalYearConfig {
        &self.config
    }

    /// Standard deduction, never more than the salary itself
    pub fn standard_deduction(&self, annual_salary: &BigDecimal) -> BigDecimal {
        annual_salary.min(&self.config.standard_deduction).clone()
    }

    /// Calculate tax, deductions and take-home pay
    pub fn calculate(&self, input: &TaxInput) -> Result<TaxResult, TaxError> {
        input
            .validate()
            .inspect_err(|e| warn!(error = %e, "rejected tax input"))?;

        let gross_salary = input.annual_salary.clone();
        let standard_deduction = self.standard_deduction(&gross_salary);
        let hra_exemption = self.config.hra.exemption(input)?;
        let taxable_income = (&gross_salary - &standard_deduction - &hra_exemption)
            .max(BigDecimal::zero());

        let slabs = self.config.slabs(input.tax_regime);
        let income_tax = slabs.compute_tax(&taxable_income);
        let tax_slab_description = slabs.describe(&taxable_income);

        let statutory = &self.config.statutory;
        let cess = statutory.cess(&income_tax);
        let deductions = statutory.deductions(&gross_salary);

        let total_deductions = &income_tax
            + &cess
            + &deductions.epf
            + &deductions.esi
            + &deductions.professional_tax;
        let net_salary = &gross_salary - &total_deductions;
        let monthly_net = &net_salary / BigDecimal::from(12);

        debug!(
            regime = %input.tax_regime,
            taxable_income = %taxable_income,
            income_tax = %income_tax,
            total_deductions = %total_deductions,
            "calculated income tax"
        );

        Ok(TaxResult {
            tax_regime: input.tax_regime,
            gross_salary,
            standard_deduction,
            hra_exemption,
            taxable_income,
            income_tax,
            cess,
            epf: deductions.epf,
            esi: deductions.esi,
            professional_tax: deductions.professional_tax,
            total_deductions,
            net_salary,
            monthly_net,
            tax_slab_description,
        })
    }

    /// Calculate under both regimes and pick the cheaper one
    pub fn compare_regimes(&self, input: &TaxInput) -> Result<RegimeComparison, TaxError> {
        let new_regime = self.calculate(&input.with_regime(TaxRegime::New))?;
        let old_regime = self.calculate(&input.with_regime(TaxRegime::Old))?;

        let (recommended, annual_savings) =
            if old_regime.total_deductions < new_regime.total_deductions {
                (
                    TaxRegime::Old,
                    &new_regime.total_deductions - &old_regime.total_deductions,
                )
            } else {
                (
                    TaxRegime::New,
                    &old_regime.total_deductions - &new_regime.total_deductions,
                )
            };

        Ok(RegimeComparison {
            new_regime,
            old_regime,
            recommended,
            annual_savings,
        })
    }
}

/// Validate a raw request and calculate it with the built-in constants
pub fn calculate_tax(request: TaxRequest) -> Result<TaxResult, TaxError> {
    let input = TaxInput::try_from(request)?;
    TaxEngine::new().calculate(&input)
}
