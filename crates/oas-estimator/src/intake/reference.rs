use serde::{Deserialize, Serialize};
use tracing::debug;

use super::evaluator::{
    BenefitEvaluator, BenefitKey, BenefitOutcome, BenefitOutcomes, EligibilityResult,
    EntitlementResult, EntitlementResultType, EvaluatorError, ResultKey, ResultReason,
};
use super::normalizer::ProcessedInput;

const OAS_AGE: f64 = 65.0;
const ALW_MIN_AGE: f64 = 60.0;
const FULL_PENSION_YEARS: f64 = 40.0;
const ALW_MIN_YEARS: f64 = 10.0;

/// Monthly rates and annual income ceilings used by [`ReferenceEvaluator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRates {
    pub oas_full_monthly: f64,
    pub oas_income_ceiling: f64,
    pub gis_single_monthly: f64,
    pub gis_partnered_monthly: f64,
    pub gis_single_ceiling: f64,
    pub gis_partnered_ceiling: f64,
    pub alw_monthly: f64,
    pub alw_ceiling: f64,
    pub alws_monthly: f64,
    pub alws_ceiling: f64,
}

impl Default for ReferenceRates {
    fn default() -> Self {
        Self {
            oas_full_monthly: 713.34,
            oas_income_ceiling: 148_451.0,
            gis_single_monthly: 1_065.47,
            gis_partnered_monthly: 641.35,
            gis_single_ceiling: 21_768.0,
            gis_partnered_ceiling: 28_752.0,
            alw_monthly: 1_354.69,
            alw_ceiling: 40_272.0,
            alws_monthly: 1_614.88,
            alws_ceiling: 29_304.0,
        }
    }
}

/// Qualitative stand-in for the real entitlement engine.
///
/// Decides eligibility from age, residence, marital situation and income
/// ceilings. Amounts are flat rates except OAS, which is prorated by 40ths.
#[derive(Debug, Clone, Default)]
pub struct ReferenceEvaluator {
    rates: ReferenceRates,
}

impl ReferenceEvaluator {
    pub fn new(rates: ReferenceRates) -> Self {
        Self { rates }
    }

    fn oas(&self, input: &ProcessedInput) -> BenefitOutcome {
        if input.age < OAS_AGE {
            let reason = if input.age.floor() == OAS_AGE - 1.0 {
                ResultReason::AgeYoung64
            } else {
                ResultReason::AgeYoung
            };
            return ineligible(reason, "detail.eligibleWhen65");
        }

        let years = input.residence_years();
        if years < f64::from(input.living_country.residency_threshold()) {
            return ineligible(ResultReason::YearsInCanada, "detail.mustMeetYearReq");
        }
        if input.income.client >= self.rates.oas_income_ceiling {
            return eligible_without_amount("detail.eligibleIncomeTooHigh");
        }

        let fortieths = years.min(FULL_PENSION_YEARS);
        let kind = if fortieths >= FULL_PENSION_YEARS {
            EntitlementResultType::Full
        } else {
            EntitlementResultType::Partial
        };
        eligible(
            self.rates.oas_full_monthly * fortieths / FULL_PENSION_YEARS,
            kind,
            "detail.eligible",
        )
    }

    fn gis(&self, input: &ProcessedInput, oas: &BenefitOutcome) -> BenefitOutcome {
        if !oas.eligibility.result.is_positive() {
            let reason = match oas.eligibility.reason {
                ResultReason::AgeYoung | ResultReason::AgeYoung64 => ResultReason::AgeYoung,
                _ => ResultReason::Oas,
            };
            return ineligible(reason, "detail.mustBeOasEligible");
        }
        if !input.living_country.canada {
            return ineligible(ResultReason::LivingCountry, "detail.mustBeInCanada");
        }

        let (ceiling, monthly) = if input.marital_status.partnered {
            (self.rates.gis_partnered_ceiling, self.rates.gis_partnered_monthly)
        } else {
            (self.rates.gis_single_ceiling, self.rates.gis_single_monthly)
        };
        if input.income.relevant() >= ceiling {
            return ineligible(ResultReason::Income, "detail.mustMeetIncomeReq");
        }
        eligible(monthly, EntitlementResultType::Full, "detail.eligible")
    }

    fn alw(&self, input: &ProcessedInput) -> BenefitOutcome {
        if let Some(outcome) = allowance_age_gate(input) {
            return outcome;
        }
        if !input.marital_status.partnered {
            return ineligible(ResultReason::MaritalStatus, "detail.mustBePartnered");
        }
        if let Some(outcome) = allowance_residence_gate(input) {
            return outcome;
        }

        let partner = input.partner_benefit_status;
        if partner.help_me {
            return BenefitOutcome {
                eligibility: EligibilityResult::new(
                    ResultKey::IncomeDependent,
                    ResultReason::Partner,
                    "detail.dependingOnPartner",
                ),
                entitlement: EntitlementResult::none(),
            };
        }
        if !partner.gis {
            return ineligible(ResultReason::Partner, "detail.mustHavePartnerWithGis");
        }
        if input.income.relevant() >= self.rates.alw_ceiling {
            return ineligible(ResultReason::Income, "detail.mustMeetIncomeReq");
        }
        eligible(self.rates.alw_monthly, EntitlementResultType::Full, "detail.eligible")
    }

    fn alws(&self, input: &ProcessedInput) -> BenefitOutcome {
        if let Some(outcome) = allowance_age_gate(input) {
            return outcome;
        }
        if !input.marital_status.widowed {
            return ineligible(ResultReason::MaritalStatus, "detail.mustBeWidowed");
        }
        if let Some(outcome) = allowance_residence_gate(input) {
            return outcome;
        }
        if input.income.adjusted_income >= self.rates.alws_ceiling {
            return ineligible(ResultReason::Income, "detail.mustMeetIncomeReq");
        }
        eligible(self.rates.alws_monthly, EntitlementResultType::Full, "detail.eligible")
    }
}

impl BenefitEvaluator for ReferenceEvaluator {
    fn evaluate(&self, input: &ProcessedInput) -> Result<BenefitOutcomes, EvaluatorError> {
        if !input.age.is_finite() || !input.income.client.is_finite() {
            return Err(EvaluatorError::Rejected(
                "age and income must be finite".to_string(),
            ));
        }

        let mut outcomes = BenefitOutcomes::new();
        if input.legal_status.other {
            for key in BenefitKey::ALL {
                outcomes.insert(key, unavailable());
            }
            return Ok(outcomes);
        }

        let oas = self.oas(input);
        let gis = self.gis(input, &oas);
        outcomes.insert(BenefitKey::Oas, oas);
        outcomes.insert(BenefitKey::Gis, gis);
        outcomes.insert(BenefitKey::Alw, self.alw(input));
        outcomes.insert(BenefitKey::Alws, self.alws(input));

        debug!(age = input.age, benefits = outcomes.len(), "reference evaluation complete");
        Ok(outcomes)
    }
}

fn allowance_age_gate(input: &ProcessedInput) -> Option<BenefitOutcome> {
    if input.age < ALW_MIN_AGE {
        Some(ineligible(ResultReason::AgeYoung, "detail.mustBe60to64"))
    } else if input.age >= OAS_AGE {
        Some(ineligible(ResultReason::Age, "detail.mustBe60to64"))
    } else {
        None
    }
}

fn allowance_residence_gate(input: &ProcessedInput) -> Option<BenefitOutcome> {
    if !input.living_country.canada {
        Some(ineligible(ResultReason::LivingCountry, "detail.mustBeInCanada"))
    } else if input.residence_years() < ALW_MIN_YEARS {
        Some(ineligible(ResultReason::YearsInCanada, "detail.mustMeetYearReq"))
    } else {
        None
    }
}

fn eligible(amount: f64, kind: EntitlementResultType, detail: &str) -> BenefitOutcome {
    BenefitOutcome {
        eligibility: EligibilityResult::new(ResultKey::Eligible, ResultReason::None, detail),
        entitlement: EntitlementResult {
            result: (amount * 100.0).round() / 100.0,
            kind,
            auto_enrollment: false,
            clawback: 0.0,
        },
    }
}

fn eligible_without_amount(detail: &str) -> BenefitOutcome {
    BenefitOutcome {
        eligibility: EligibilityResult::new(ResultKey::Eligible, ResultReason::Income, detail),
        entitlement: EntitlementResult::none(),
    }
}

fn ineligible(reason: ResultReason, detail: &str) -> BenefitOutcome {
    BenefitOutcome {
        eligibility: EligibilityResult::new(ResultKey::Ineligible, reason, detail),
        entitlement: EntitlementResult::none(),
    }
}

fn unavailable() -> BenefitOutcome {
    BenefitOutcome {
        eligibility: EligibilityResult::new(
            ResultKey::Unavailable,
            ResultReason::LegalStatus,
            "detail.dependingOnLegal",
        ),
        entitlement: EntitlementResult::unavailable(),
    }
}
