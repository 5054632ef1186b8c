//! Tax calculation inputs and the request shape they are parsed from

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TaxError;

/// Oldest age accepted as plausible input
pub const MAX_AGE: i32 = 120;

/// Statutory tax regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// Concessional regime with wider, lower-rate slabs
    #[default]
    New,
    /// Legacy regime
    Old,
}

impl FromStr for TaxRegime {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(TaxRegime::New),
            "old" => Ok(TaxRegime::Old),
            other => Err(TaxError::InvalidInput(format!(
                "unknown tax regime '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::New => write!(f, "new"),
            TaxRegime::Old => write!(f, "old"),
        }
    }
}

/// City classification for the HRA cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityType {
    #[default]
    Metro,
    NonMetro,
}

impl FromStr for CityType {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metro" => Ok(CityType::Metro),
            "non-metro" | "non_metro" => Ok(CityType::NonMetro),
            other => Err(TaxError::InvalidInput(format!(
                "unknown city type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityType::Metro => write!(f, "metro"),
            CityType::NonMetro => write!(f, "non-metro"),
        }
    }
}

/// Everything the engine needs for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual compensation
    pub annual_salary: BigDecimal,
    /// Accepted and validated, but no slab varies by age
    pub age: i32,
    pub has_hra: bool,
    /// Monthly HRA received; ignored unless `has_hra`
    pub hra_monthly_amount: BigDecimal,
    pub city_type: CityType,
    pub tax_regime: TaxRegime,
}

impl TaxInput {
    /// Start a builder with the default age, HRA flag, city and regime
    pub fn builder(annual_salary: BigDecimal) -> TaxInputBuilder {
        TaxInputBuilder::new(annual_salary)
    }

    /// Reject out-of-range values instead of clamping them
    pub fn validate(&self) -> Result<(), TaxError> {
        if self.annual_salary < BigDecimal::zero() {
            return Err(TaxError::InvalidInput(format!(
                "annual salary cannot be negative: {}",
                self.annual_salary
            )));
        }

        if self.hra_monthly_amount < BigDecimal::zero() {
            return Err(TaxError::InvalidInput(format!(
                "HRA amount cannot be negative: {}",
                self.hra_monthly_amount
            )));
        }

        if !(0..=MAX_AGE).contains(&self.age) {
            return Err(TaxError::InvalidInput(format!(
                "age {} is outside 0..={}",
                self.age, MAX_AGE
            )));
        }

        Ok(())
    }

    /// Same input under the other regime
    pub fn with_regime(&self, tax_regime: TaxRegime) -> Self {
        Self {
            tax_regime,
            ..self.clone()
        }
    }
}

/// Builder for [`TaxInput`]
#[derive(Debug, Clone)]
pub struct TaxInputBuilder {
    input: TaxInput,
}

impl TaxInputBuilder {
    pub fn new(annual_salary: BigDecimal) -> Self {
        Self {
            input: TaxInput {
                annual_salary,
                age: 30,
                has_hra: true,
                hra_monthly_amount: BigDecimal::zero(),
                city_type: CityType::Metro,
                tax_regime: TaxRegime::New,
            },
        }
    }

    pub fn age(mut self, age: i32) -> Self {
        self.input.age = age;
        self
    }

    pub fn has_hra(mut self, has_hra: bool) -> Self {
        self.input.has_hra = has_hra;
        self
    }

    /// Set the monthly HRA amount
    pub fn hra_monthly_amount(mut self, amount: BigDecimal) -> Self {
        self.input.hra_monthly_amount = amount;
        self
    }

    pub fn city_type(mut self, city_type: CityType) -> Self {
        self.input.city_type = city_type;
        self
    }

    pub fn tax_regime(mut self, tax_regime: TaxRegime) -> Self {
        self.input.tax_regime = tax_regime;
        self
    }

    /// Validate and build the input
    pub fn build(self) -> Result<TaxInput, TaxError> {
        self.input.validate()?;
        Ok(self.input)
    }
}

/// Raw calculation request as posted by a client.
///
/// Field names follow the JSON API (`grossPay`, `hasHRA`, `hraAmount`,
/// `cityType`, `taxRegime`); enums arrive as strings and are checked when
/// converting into a [`TaxInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxRequest {
    pub gross_pay: Option<BigDecimal>,
    pub age: i32,
    #[serde(rename = "hasHRA")]
    pub has_hra: bool,
    pub hra_amount: BigDecimal,
    pub city_type: String,
    pub tax_regime: String,
}

impl Default for TaxRequest {
    fn default() -> Self {
        Self {
            gross_pay: None,
            age: 30,
            has_hra: true,
            hra_amount: BigDecimal::zero(),
            city_type: CityType::Metro.to_string(),
            tax_regime: TaxRegime::New.to_string(),
        }
    }
}

impl TaxRequest {
    /// Parse a JSON request body
    pub fn from_json(body: &str) -> Result<Self, TaxError> {
        serde_json::from_str(body)
            .map_err(|e| TaxError::InvalidInput(format!("malformed request: {}", e)))
    }
}

impl TryFrom<TaxRequest> for TaxInput {
    type Error = TaxError;

    fn try_from(request: TaxRequest) -> Result<Self, Self::Error> {
        let annual_salary = request
            .gross_pay
            .ok_or_else(|| TaxError::InvalidInput("grossPay is required".to_string()))?;

        TaxInput::builder(annual_salary)
            .age(request.age)
            .has_hra(request.has_hra)
            .hra_monthly_amount(request.hra_amount)
            .city_type(request.city_type.parse()?)
            .tax_regime(request.tax_regime.parse()?)
            .build()
    }
}
