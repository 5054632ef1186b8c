//! Monthly payslip generation

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::records::TaxProfile;
use crate::tax::TaxEngine;
use crate::types::*;

/// Employee details printed on a payslip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub employee_id: String,
    pub designation: String,
    pub department: String,
    /// Permanent Account Number
    pub pan_number: String,
    /// Universal Account Number for EPF
    pub uan_number: String,
}

/// Employer details printed on a payslip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
}

/// Attendance for the month being paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Label such as `December 2024`
    pub month_year: String,
    pub working_days: u32,
    pub paid_days: u32,
}

impl PayPeriod {
    /// Create a pay period with full attendance
    pub fn full_month(month_year: String, working_days: u32) -> Self {
        Self {
            month_year,
            working_days,
            paid_days: working_days,
        }
    }

    /// Loss-of-pay days
    pub fn loss_of_pay_days(&self) -> u32 {
        self.working_days.saturating_sub(self.paid_days)
    }

    pub fn validate(&self) -> RecordResult<()> {
        if self.working_days == 0 {
            return Err(RecordError::Validation(
                "Pay period must have working days".to_string(),
            ));
        }

        if self.paid_days > self.working_days {
            return Err(RecordError::Validation(format!(
                "Paid days {} exceed working days {}",
                self.paid_days, self.working_days
            )));
        }

        Ok(())
    }
}

/// One labelled amount on a payslip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipLine {
    pub label: String,
    pub amount: BigDecimal,
}

impl PayslipLine {
    fn new(label: &str, amount: BigDecimal) -> Self {
        Self {
            label: label.to_string(),
            amount,
        }
    }
}

/// A monthly payslip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    pub employee: EmployeeInfo,
    pub company: CompanyInfo,
    pub period: PayPeriod,
    pub earnings: Vec<PayslipLine>,
    pub deductions: Vec<PayslipLine>,
    pub gross_earnings: BigDecimal,
    pub total_deductions: BigDecimal,
    pub net_pay: BigDecimal,
    pub currency: Currency,
}

/// Builds payslips from salary entries using the tax engine's annual figures
#[derive(Debug, Clone, Default)]
pub struct PayslipGenerator {
    engine: TaxEngine,
    profile: TaxProfile,
}

impl PayslipGenerator {
    pub fn new(engine: TaxEngine, profile: TaxProfile) -> Self {
        Self { engine, profile }
    }

    /// Generate the payslip for one month of `entry`.
    ///
    /// Earnings are prorated by paid days. Deductions are one twelfth of the
    /// annual figures computed on the entry's full annualized gross.
    pub fn generate(
        &self,
        employee: EmployeeInfo,
        company: CompanyInfo,
        period: PayPeriod,
        entry: &SalaryEntry,
    ) -> RecordResult<Payslip> {
        period.validate()?;

        let twelve = BigDecimal::from(12);
        // Divide last; 1/12 has no exact decimal form
        let scale = BigDecimal::from(entry.period.periods_per_year() * period.paid_days);
        let divisor = &twelve * BigDecimal::from(period.working_days);
        let monthly = |amount: &BigDecimal| amount * &scale / &divisor;

        let earnings = vec![
            PayslipLine::new("Basic Salary", monthly(&entry.base_salary)),
            PayslipLine::new("House Rent Allowance", monthly(&entry.hra)),
            PayslipLine::new("Allowances", monthly(&entry.allowances)),
            PayslipLine::new("Bonus", monthly(&entry.bonuses)),
            PayslipLine::new("Overtime", monthly(&entry.overtime)),
        ];

        let tax = self.engine.calculate(&self.profile.input_for(entry)?)?;
        let deductions = vec![
            PayslipLine::new("Income Tax", tax.total_income_tax() / &twelve),
            PayslipLine::new("EPF (Employee)", &tax.epf / &twelve),
            PayslipLine::new("ESI", &tax.esi / &twelve),
            PayslipLine::new("Professional Tax", &tax.professional_tax / &twelve),
        ];

        let gross_earnings: BigDecimal = earnings.iter().map(|line| &line.amount).sum();
        let total_deductions: BigDecimal = deductions.iter().map(|line| &line.amount).sum();
        let net_pay = &gross_earnings - &total_deductions;

        Ok(Payslip {
            employee,
            company,
            period,
            earnings: earnings
                .into_iter()
                .filter(|line| !line.amount.is_zero())
                .collect(),
            deductions,
            gross_earnings,
            total_deductions,
            net_pay,
            currency: entry.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::seed_salary_entries;

    fn employee() -> EmployeeInfo {
        EmployeeInfo {
            name: "Ishan".to_string(),
            employee_id: "EMP001".to_string(),
            designation: "Senior Software Engineer".to_string(),
            department: "Technology".to_string(),
            pan_number: "ABCDE1234F".to_string(),
            uan_number: "123456789012".to_string(),
        }
    }

    fn company() -> CompanyInfo {
        CompanyInfo {
            name: "TechCorp Solutions Pvt Ltd".to_string(),
            address: "Sector 62, Noida, UP - 201301".to_string(),
        }
    }

    #[test]
    fn test_full_month_payslip() {
        let entry = &seed_salary_entries()[0];
        let payslip = PayslipGenerator::default()
            .generate(
                employee(),
                company(),
                PayPeriod::full_month("December 2024".to_string(), 22),
                entry,
            )
            .unwrap();

        assert_eq!(payslip.gross_earnings, BigDecimal::from(95_000));
        // Overtime is zero and omitted
        assert_eq!(payslip.earnings.len(), 4);
        assert_eq!(payslip.deductions.len(), 4);
        assert_eq!(payslip.deductions[1].amount, BigDecimal::from(1_800));
        assert_eq!(payslip.deductions[3].amount, BigDecimal::from(200));
        assert_eq!(
            payslip.net_pay,
            &payslip.gross_earnings - &payslip.total_deductions
        );
        assert_eq!(payslip.period.loss_of_pay_days(), 0);
    }

    #[test]
    fn test_loss_of_pay_prorates_earnings() {
        let entry = &seed_salary_entries()[1];
        let period = PayPeriod {
            month_year: "November 2024".to_string(),
            working_days: 20,
            paid_days: 15,
        };
        let payslip = PayslipGenerator::default()
            .generate(employee(), company(), period, entry)
            .unwrap();

        assert_eq!(payslip.period.loss_of_pay_days(), 5);
        assert_eq!(payslip.gross_earnings, BigDecimal::from(67_500));
    }

    #[test]
    fn test_yearly_entry_payslip() {
        let mut entry = SalaryEntry::new(
            "annual-2025".to_string(),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            BigDecimal::from(720_000),
            BigDecimal::from(240_000),
        );
        entry.allowances = BigDecimal::from(240_000);
        entry.period = PayFrequency::Yearly;

        let payslip = PayslipGenerator::default()
            .generate(
                employee(),
                company(),
                PayPeriod::full_month("January 2025".to_string(), 23),
                &entry,
            )
            .unwrap();

        assert_eq!(payslip.earnings[0].amount, BigDecimal::from(60_000));
        assert_eq!(payslip.earnings[1].amount, BigDecimal::from(20_000));
        assert_eq!(payslip.gross_earnings, BigDecimal::from(100_000));
        assert_eq!(payslip.total_deductions, BigDecimal::from(6_186));
        assert_eq!(payslip.net_pay, BigDecimal::from(93_814));
    }

    #[test]
    fn test_invalid_period() {
        let entry = &seed_salary_entries()[0];
        let period = PayPeriod {
            month_year: "December 2024".to_string(),
            working_days: 20,
            paid_days: 21,
        };
        let result = PayslipGenerator::default().generate(employee(), company(), period, entry);
        assert!(matches!(result, Err(RecordError::Validation(_))));
    }
}
