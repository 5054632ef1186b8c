//! House Rent Allowance exemption

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use super::{decimal, CityType, TaxError, TaxInput};

/// Assumptions used to derive the HRA exemption from salary alone.
///
/// Basic pay here is a share of gross that is independent of the share the
/// EPF calculation uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HraRules {
    /// Basic pay as a share of gross salary (0.5)
    pub basic_share: BigDecimal,
    /// Rent paid assumed as a multiple of HRA received (1.2)
    pub rent_multiplier: BigDecimal,
    /// Share of basic subtracted from rent paid (0.1)
    pub rent_offset_share: BigDecimal,
    /// Cap as a share of basic in metro cities (0.5)
    pub metro_cap_share: BigDecimal,
    /// Cap as a share of basic elsewhere (0.4)
    pub non_metro_cap_share: BigDecimal,
}

impl Default for HraRules {
    fn default() -> Self {
        Self {
            basic_share: decimal(5, 1),
            rent_multiplier: decimal(12, 1),
            rent_offset_share: decimal(1, 1),
            metro_cap_share: decimal(5, 1),
            non_metro_cap_share: decimal(4, 1),
        }
    }
}

impl HraRules {
    /// The three statutory candidates: HRA received, rent paid less a share
    /// of basic, and the city-dependent cap on basic.
    pub fn candidates(
        &self,
        annual_salary: &BigDecimal,
        hra_monthly_amount: &BigDecimal,
        city_type: CityType,
    ) -> [BigDecimal; 3] {
        let basic = annual_salary * &self.basic_share;
        let hra_received = hra_monthly_amount * BigDecimal::from(12);
        let rent_paid = &hra_received * &self.rent_multiplier;
        let cap_share = match city_type {
            CityType::Metro => &self.metro_cap_share,
            CityType::NonMetro => &self.non_metro_cap_share,
        };

        [
            hra_received,
            rent_paid - &basic * &self.rent_offset_share,
            &basic * cap_share,
        ]
    }

    /// Annual HRA exemption for `input`
    pub fn exemption(&self, input: &TaxInput) -> Result<BigDecimal, TaxError> {
        if !input.has_hra || input.hra_monthly_amount <= BigDecimal::zero() {
            return Ok(BigDecimal::zero());
        }

        smallest_positive(self.candidates(
            &input.annual_salary,
            &input.hra_monthly_amount,
            input.city_type,
        ))
    }
}

/// Minimum over the strictly positive candidates.
///
/// Non-positive candidates are dropped rather than clamped, so an all
/// non-positive set has no minimum.
pub fn smallest_positive(
    candidates: impl IntoIterator<Item = BigDecimal>,
) -> Result<BigDecimal, TaxError> {
    candidates
        .into_iter()
        .filter(|candidate| *candidate > BigDecimal::zero())
        .min()
        .ok_or_else(|| {
            TaxError::Calculation("no positive HRA exemption candidate".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(salary: i64, hra: i64, city_type: CityType) -> TaxInput {
        TaxInput::builder(BigDecimal::from(salary))
            .hra_monthly_amount(BigDecimal::from(hra))
            .city_type(city_type)
            .build()
            .unwrap()
    }

    #[test]
    fn test_metro_exemption_takes_rent_candidate() {
        let rules = HraRules::default();
        let candidates = rules.candidates(
            &BigDecimal::from(1_200_000),
            &BigDecimal::from(20_000),
            CityType::Metro,
        );

        assert_eq!(candidates[0], BigDecimal::from(240_000));
        assert_eq!(candidates[1], BigDecimal::from(228_000));
        assert_eq!(candidates[2], BigDecimal::from(300_000));

        let exemption = rules
            .exemption(&input(1_200_000, 20_000, CityType::Metro))
            .unwrap();
        assert_eq!(exemption, BigDecimal::from(228_000));
    }

    #[test]
    fn test_non_metro_cap() {
        let rules = HraRules::default();
        // basic = 300000, cap = 120000, received = 360000, rent - 10% basic = 402000
        let exemption = rules
            .exemption(&input(600_000, 30_000, CityType::NonMetro))
            .unwrap();
        assert_eq!(exemption, BigDecimal::from(120_000));
    }

    #[test]
    fn test_no_hra_means_no_exemption() {
        let rules = HraRules::default();

        let zero_amount = input(1_200_000, 0, CityType::Metro);
        assert_eq!(rules.exemption(&zero_amount).unwrap(), BigDecimal::zero());

        let mut without_hra = input(1_200_000, 20_000, CityType::Metro);
        without_hra.has_hra = false;
        assert_eq!(rules.exemption(&without_hra).unwrap(), BigDecimal::zero());
    }

    #[test]
    fn test_non_positive_candidates_are_excluded() {
        // basic = 5000000, rent candidate = 12000 - 500000 < 0
        let exemption = HraRules::default()
            .exemption(&input(10_000_000, 833, CityType::Metro))
            .unwrap();
        assert_eq!(exemption, BigDecimal::from(9_996));
    }

    #[test]
    fn test_empty_candidate_set_is_an_error() {
        let result = smallest_positive([
            BigDecimal::zero(),
            BigDecimal::from(-10),
            BigDecimal::from(-1),
        ]);
        assert!(matches!(result, Err(TaxError::Calculation(_))));
    }
}
