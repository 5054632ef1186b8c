//! Progressive slab tables and the marginal tax fold

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::{decimal, TaxError};

/// One income bracket with its marginal rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Inclusive upper bound of the bracket; `None` for the open top bracket
    pub upper_bound: Option<BigDecimal>,
    /// Marginal rate as a fraction (0.05 for 5%)
    pub rate: BigDecimal,
}

impl TaxSlab {
    /// Create a bounded slab
    pub fn bounded(upper_bound: BigDecimal, rate: BigDecimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Create the open-ended top slab
    pub fn unbounded(rate: BigDecimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Ordered slab table; bounds strictly increase and the last slab is open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlabTable {
    pub slabs: Vec<TaxSlab>,
}

impl TaxSlabTable {
    /// Create a validated slab table
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, TaxError> {
        let table = Self { slabs };
        table.validate()?;
        Ok(table)
    }

    /// New regime slabs for FY 2023-24
    pub fn new_regime() -> Self {
        Self {
            slabs: vec![
                TaxSlab::bounded(BigDecimal::from(300_000), BigDecimal::zero()),
                TaxSlab::bounded(BigDecimal::from(600_000), decimal(5, 2)),
                TaxSlab::bounded(BigDecimal::from(900_000), decimal(10, 2)),
                TaxSlab::bounded(BigDecimal::from(1_200_000), decimal(15, 2)),
                TaxSlab::bounded(BigDecimal::from(1_500_000), decimal(20, 2)),
                TaxSlab::unbounded(decimal(30, 2)),
            ],
        }
    }

    /// Old regime slabs for FY 2023-24
    pub fn old_regime() -> Self {
        Self {
            slabs: vec![
                TaxSlab::bounded(BigDecimal::from(250_000), BigDecimal::zero()),
                TaxSlab::bounded(BigDecimal::from(500_000), decimal(5, 2)),
                TaxSlab::bounded(BigDecimal::from(1_000_000), decimal(20, 2)),
                TaxSlab::unbounded(decimal(30, 2)),
            ],
        }
    }

    /// Check ordering, the open top slab and rate range
    pub fn validate(&self) -> Result<(), TaxError> {
        let Some((last, rest)) = self.slabs.split_last() else {
            return Err(TaxError::Config("slab table cannot be empty".to_string()));
        };

        if last.upper_bound.is_some() {
            return Err(TaxError::Config(
                "last slab must have no upper bound".to_string(),
            ));
        }

        let mut previous = BigDecimal::zero();
        for slab in rest {
            let upper = slab.upper_bound.as_ref().ok_or_else(|| {
                TaxError::Config("only the last slab may be unbounded".to_string())
            })?;
            if *upper <= previous {
                return Err(TaxError::Config(format!(
                    "slab bounds must strictly increase: {} after {}",
                    upper, previous
                )));
            }
            previous = upper.clone();
        }

        for slab in &self.slabs {
            if slab.rate < BigDecimal::zero() || slab.rate > BigDecimal::from(1) {
                return Err(TaxError::Config(format!(
                    "slab rate {} is outside [0, 1]",
                    slab.rate
                )));
            }
        }

        Ok(())
    }

    /// Pre-cess tax on `taxable_income`.
    ///
    /// Each slab taxes the part of the income between its lower edge and
    /// `min(income, upper_bound)`. An income equal to a bound is taxed
    /// entirely at the lower slab's rate.
    pub fn compute_tax(&self, taxable_income: &BigDecimal) -> BigDecimal {
        let mut tax = BigDecimal::zero();
        let mut lower = BigDecimal::zero();

        for slab in &self.slabs {
            if *taxable_income <= lower {
                break;
            }
            let top = match &slab.upper_bound {
                Some(upper) => upper.min(taxable_income),
                None => taxable_income,
            };
            tax += &slab.rate * &(top - &lower);

            match &slab.upper_bound {
                Some(upper) => lower = upper.clone(),
                None => break,
            }
        }

        tax
    }

    /// Index of the slab `taxable_income` falls into
    pub fn bracket_index(&self, taxable_income: &BigDecimal) -> usize {
        self.slabs
            .iter()
            .position(|slab| {
                slab.upper_bound
                    .as_ref()
                    .is_none_or(|upper| taxable_income <= upper)
            })
            .unwrap_or(self.slabs.len().saturating_sub(1))
    }

    /// Human-readable label of the bracket `taxable_income` falls into,
    /// e.g. `5% (₹3L – ₹6L)`.
    pub fn describe(&self, taxable_income: &BigDecimal) -> String {
        let index = self.bracket_index(taxable_income);
        let Some(slab) = self.slabs.get(index) else {
            return String::new();
        };

        let lower = match index {
            0 => None,
            _ => self.slabs[index - 1].upper_bound.as_ref(),
        };
        let rate = if slab.rate.is_zero() {
            "No Tax".to_string()
        } else {
            format!("{}%", trimmed(&(&slab.rate * BigDecimal::from(100))))
        };

        match (lower, &slab.upper_bound) {
            (None, Some(upper)) => format!("{} (Up to ₹{})", rate, lakhs(upper)),
            (Some(lower), Some(upper)) => {
                format!("{} (₹{} – ₹{})", rate, lakhs(lower), lakhs(upper))
            }
            (Some(lower), None) => format!("{} (Above ₹{})", rate, lakhs(lower)),
            (None, None) => format!("{} (All income)", rate),
        }
    }
}

fn lakhs(amount: &BigDecimal) -> String {
    format!("{}L", trimmed(&(amount / BigDecimal::from(100_000))))
}

/// Render without trailing zeros: `5.00` becomes `5`, `2.50` becomes `2.5`
fn trimmed(value: &BigDecimal) -> String {
    let normalized = value.normalized();
    if normalized.is_integer() {
        normalized.with_scale(0).to_string()
    } else {
        normalized.to_string()
    }
}
