//! Fiscal-year constants for the tax engine

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::{HraRules, StatutoryRules, TaxError, TaxRegime, TaxSlabTable};

/// All constants for one fiscal year.
///
/// The default is FY 2023-24. A different year can be loaded from JSON with
/// [`FiscalYearConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalYearConfig {
    /// Label such as `2023-24`
    pub fiscal_year: String,
    /// Standard deduction cap; the deduction never exceeds the salary
    pub standard_deduction: BigDecimal,
    pub new_regime_slabs: TaxSlabTable,
    pub old_regime_slabs: TaxSlabTable,
    pub hra: HraRules,
    pub statutory: StatutoryRules,
}

impl Default for FiscalYearConfig {
    fn default() -> Self {
        Self {
            fiscal_year: "2023-24".to_string(),
            standard_deduction: BigDecimal::from(50_000),
            new_regime_slabs: TaxSlabTable::new_regime(),
            old_regime_slabs: TaxSlabTable::old_regime(),
            hra: HraRules::default(),
            statutory: StatutoryRules::default(),
        }
    }
}

impl FiscalYearConfig {
    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, TaxError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TaxError::Config(format!("cannot parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Slab table for `regime`
    pub fn slabs(&self, regime: TaxRegime) -> &TaxSlabTable {
        match regime {
            TaxRegime::New => &self.new_regime_slabs,
            TaxRegime::Old => &self.old_regime_slabs,
        }
    }

    /// Validate slab tables and every rate and cap
    pub fn validate(&self) -> Result<(), TaxError> {
        self.new_regime_slabs.validate()?;
        self.old_regime_slabs.validate()?;

        let amounts = [
            ("standard_deduction", &self.standard_deduction),
            ("rent_multiplier", &self.hra.rent_multiplier),
            ("epf_monthly_cap", &self.statutory.epf_monthly_cap),
            ("esi_monthly_threshold", &self.statutory.esi_monthly_threshold),
            ("professional_tax_cap", &self.statutory.professional_tax_cap),
        ];
        for (name, amount) in amounts {
            if *amount < BigDecimal::zero() {
                return Err(TaxError::Config(format!("{} cannot be negative", name)));
            }
        }

        let rates = [
            ("basic_share", &self.hra.basic_share),
            ("rent_offset_share", &self.hra.rent_offset_share),
            ("metro_cap_share", &self.hra.metro_cap_share),
            ("non_metro_cap_share", &self.hra.non_metro_cap_share),
            ("epf_basic_share", &self.statutory.epf_basic_share),
            ("epf_rate", &self.statutory.epf_rate),
            ("esi_rate", &self.statutory.esi_rate),
            ("professional_tax_rate", &self.statutory.professional_tax_rate),
            ("cess_rate", &self.statutory.cess_rate),
        ];
        let one = BigDecimal::from(1);
        for (name, rate) in rates {
            if *rate < BigDecimal::zero() || *rate > one {
                return Err(TaxError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }
}
