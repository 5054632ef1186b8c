//! Statutory payroll deductions: EPF, ESI, professional tax and cess

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::decimal;

/// Rates, caps and thresholds for the statutory deductions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryRules {
    /// Basic pay as a share of gross for EPF purposes (0.4)
    pub epf_basic_share: BigDecimal,
    /// Employee EPF contribution rate on monthly basic (0.12)
    pub epf_rate: BigDecimal,
    /// Monthly cap on the employee EPF contribution (1800)
    pub epf_monthly_cap: BigDecimal,
    /// ESI rate on gross salary (0.0075)
    pub esi_rate: BigDecimal,
    /// Highest monthly gross that is still ESI-eligible (21000)
    pub esi_monthly_threshold: BigDecimal,
    /// Professional tax rate on gross salary (0.005)
    pub professional_tax_rate: BigDecimal,
    /// Annual professional tax cap (2400)
    pub professional_tax_cap: BigDecimal,
    /// Health & Education Cess on income tax (0.04)
    pub cess_rate: BigDecimal,
}

impl Default for StatutoryRules {
    fn default() -> Self {
        Self {
            epf_basic_share: decimal(4, 1),
            epf_rate: decimal(12, 2),
            epf_monthly_cap: BigDecimal::from(1_800),
            esi_rate: decimal(75, 4),
            esi_monthly_threshold: BigDecimal::from(21_000),
            professional_tax_rate: decimal(5, 3),
            professional_tax_cap: BigDecimal::from(2_400),
            cess_rate: decimal(4, 2),
        }
    }
}

/// Statutory deductions for one annual salary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryDeductions {
    pub epf: BigDecimal,
    pub esi: BigDecimal,
    pub professional_tax: BigDecimal,
}

impl StatutoryRules {
    /// Annual employee EPF contribution, capped per month
    pub fn epf(&self, annual_salary: &BigDecimal) -> BigDecimal {
        let twelve = BigDecimal::from(12);
        let monthly_basic = annual_salary * &self.epf_basic_share / &twelve;
        let monthly_contribution =
            (monthly_basic * &self.epf_rate).min(self.epf_monthly_cap.clone());
        monthly_contribution * twelve
    }

    /// Whether the monthly gross is at or under the ESI threshold
    pub fn esi_eligible(&self, annual_salary: &BigDecimal) -> bool {
        annual_salary / BigDecimal::from(12) <= self.esi_monthly_threshold
    }

    /// Annual ESI contribution; zero above the eligibility threshold
    pub fn esi(&self, annual_salary: &BigDecimal) -> BigDecimal {
        if self.esi_eligible(annual_salary) {
            annual_salary * &self.esi_rate
        } else {
            BigDecimal::zero()
        }
    }

    /// Annual professional tax, independent of regime
    pub fn professional_tax(&self, annual_salary: &BigDecimal) -> BigDecimal {
        (annual_salary * &self.professional_tax_rate)
            .min(self.professional_tax_cap.clone())
    }

    /// Cess on pre-cess income tax
    pub fn cess(&self, income_tax: &BigDecimal) -> BigDecimal {
        income_tax * &self.cess_rate
    }

    /// EPF, ESI and professional tax together
    pub fn deductions(&self, annual_salary: &BigDecimal) -> StatutoryDeductions {
        StatutoryDeductions {
            epf: self.epf(annual_salary),
            esi: self.esi(annual_salary),
            professional_tax: self.professional_tax(annual_salary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epf_is_capped() {
        let rules = StatutoryRules::default();
        assert_eq!(
            rules.epf(&BigDecimal::from(1_200_000)),
            BigDecimal::from(21_600)
        );
    }

    #[test]
    fn test_epf_below_cap() {
        let rules = StatutoryRules::default();
        // basic 120000 -> 10000/month -> 1200/month
        assert_eq!(
            rules.epf(&BigDecimal::from(300_000)),
            BigDecimal::from(14_400)
        );
    }

    #[test]
    fn test_esi_cliff() {
        let rules = StatutoryRules::default();

        assert!(rules.esi_eligible(&BigDecimal::from(252_000)));
        assert_eq!(
            rules.esi(&BigDecimal::from(252_000)),
            BigDecimal::from(1_890)
        );

        assert!(!rules.esi_eligible(&BigDecimal::from(252_001)));
        assert_eq!(rules.esi(&BigDecimal::from(252_001)), BigDecimal::zero());
    }

    #[test]
    fn test_professional_tax() {
        let rules = StatutoryRules::default();
        assert_eq!(
            rules.professional_tax(&BigDecimal::from(1_200_000)),
            BigDecimal::from(2_400)
        );
        assert_eq!(
            rules.professional_tax(&BigDecimal::from(200_000)),
            BigDecimal::from(1_000)
        );
        assert_eq!(
            rules.professional_tax(&BigDecimal::zero()),
            BigDecimal::zero()
        );
    }

    #[test]
    fn test_cess() {
        let rules = StatutoryRules::default();
        assert_eq!(
            rules.cess(&BigDecimal::from(48_300)),
            BigDecimal::from(1_932)
        );
    }
}
