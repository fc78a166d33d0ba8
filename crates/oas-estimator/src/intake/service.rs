use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::cards::{benefit_result, CardContext};
use super::domain::{FieldKey, Language, PartnerBenefitStatus, RawAnswers};
use super::evaluator::{BenefitEvaluator, BenefitKey, BenefitOutcomes, EvaluatorError};
use super::fields::FieldConfig;
use super::normalizer::{normalize_household, PartnerBenefitStanding, ProcessedInput};
use super::requirements::{FieldRequirements, RequirementResolver};
use super::summary::{BenefitResults, Summary};
use super::translations::{TranslationCatalog, Translations};
use super::validation::{FieldError, ValidationSchema};

const OAS_AGE: f64 = 65.0;

/// Request-scoped composition of resolver, schema, normalizer and evaluator.
pub struct EstimationService<E> {
    resolver: RequirementResolver,
    schema: ValidationSchema,
    evaluator: Arc<E>,
    translations: Arc<Translations>,
}

impl<E> EstimationService<E>
where
    E: BenefitEvaluator + 'static,
{
    pub fn new(
        evaluator: Arc<E>,
        translations: Arc<Translations>,
        schema: ValidationSchema,
    ) -> Self {
        Self {
            resolver: RequirementResolver::default(),
            schema,
            evaluator,
            translations,
        }
    }

    pub fn fields(&self) -> &'static [FieldConfig] {
        self.resolver.catalog()
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    /// Resolve, then validate, normalize and evaluate once nothing is missing.
    pub fn process(
        &self,
        answers: &RawAnswers,
        language: Language,
    ) -> Result<EstimationResponse, EstimationError> {
        let catalog = self.translations.catalog(language);
        let requirements = self.resolver.resolve(answers);

        if !requirements.is_complete() {
            debug!(missing = requirements.missing.len(), "answers incomplete");
            let success = EstimationSuccess::more_info(requirements, self.fields(), catalog);
            return Ok(EstimationResponse::Success(Box::new(success)));
        }

        let validated = match self.schema.validate_resolved(answers, &requirements) {
            Ok(validated) => validated,
            Err(errors) => {
                return Ok(EstimationResponse::Invalid(InvalidResponse {
                    visible_fields: requirements.visible,
                    missing_fields: requirements.missing,
                    error: INVALID,
                    detail: errors.errors().to_vec(),
                }));
            }
        };

        let household = normalize_household(&validated);
        let client = self.evaluate(&household.client)?;
        let results = card_results(&client, &household.client, false, false, catalog);
        let future_results = self.future_results(&household.client, false, catalog)?;

        let (partner_results, future_partner_results) = match household.partner {
            Some(partner) => {
                let partner = partner.with_partner_benefit(receiving(&client));
                let outcomes = self.evaluate(&partner)?;
                (
                    card_results(&outcomes, &partner, true, false, catalog),
                    self.future_results(&partner, true, catalog)?,
                )
            }
            None => (BenefitResults::new(), BenefitResults::new()),
        };

        let summary = Summary::from_results(&results, &partner_results, catalog);
        debug!(state = summary.state.as_str(), "estimation complete");

        Ok(EstimationResponse::Success(Box::new(EstimationSuccess {
            results,
            future_client_results: future_results,
            partner_results,
            future_partner_results,
            summary,
            visible_fields: requirements.visible,
            missing_fields: requirements.missing,
            field_data: self.fields(),
        })))
    }

    fn evaluate(&self, input: &ProcessedInput) -> Result<BenefitOutcomes, EstimationError> {
        self.evaluator.evaluate(input).map_err(|error| {
            warn!(%error, "benefit evaluation failed");
            EstimationError::Evaluator(error)
        })
    }

    /// Results at 65 for anyone younger.
    fn future_results(
        &self,
        input: &ProcessedInput,
        partner: bool,
        catalog: &TranslationCatalog,
    ) -> Result<BenefitResults, EstimationError> {
        if input.age >= OAS_AGE {
            return Ok(BenefitResults::new());
        }

        let projected = input.projected_to(OAS_AGE);
        let outcomes = self.evaluate(&projected)?;
        Ok(card_results(&outcomes, &projected, partner, true, catalog))
    }
}

fn card_results(
    outcomes: &BenefitOutcomes,
    input: &ProcessedInput,
    partner: bool,
    future: bool,
    catalog: &TranslationCatalog,
) -> BenefitResults {
    outcomes
        .iter()
        .map(|(benefit, outcome)| {
            let context = CardContext {
                benefit,
                outcome,
                input,
                partner,
                future,
            };
            (benefit, benefit_result(context, catalog))
        })
        .collect()
}

/// What the applicant would receive, as seen from the partner's side.
fn receiving(outcomes: &BenefitOutcomes) -> PartnerBenefitStanding {
    let positive = |key| {
        outcomes
            .get(key)
            .map(|outcome| outcome.eligibility.result.is_positive())
            .unwrap_or(false)
    };

    let status = match (positive(BenefitKey::Oas), positive(BenefitKey::Gis)) {
        (true, true) => PartnerBenefitStatus::OasGis,
        (true, false) => PartnerBenefitStatus::Oas,
        _ if positive(BenefitKey::Alw) => PartnerBenefitStatus::Alw,
        _ => PartnerBenefitStatus::None,
    };
    PartnerBenefitStanding::from(status)
}

const INVALID: &str = "INVALID";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationSuccess {
    pub results: BenefitResults,
    pub future_client_results: BenefitResults,
    pub partner_results: BenefitResults,
    pub future_partner_results: BenefitResults,
    pub summary: Summary,
    pub visible_fields: Vec<FieldKey>,
    pub missing_fields: Vec<FieldKey>,
    pub field_data: &'static [FieldConfig],
}

impl EstimationSuccess {
    fn more_info(
        requirements: FieldRequirements,
        field_data: &'static [FieldConfig],
        catalog: &TranslationCatalog,
    ) -> Self {
        Self {
            results: BenefitResults::new(),
            future_client_results: BenefitResults::new(),
            partner_results: BenefitResults::new(),
            future_partner_results: BenefitResults::new(),
            summary: Summary::more_info(catalog),
            visible_fields: requirements.visible,
            missing_fields: requirements.missing,
            field_data,
        }
    }
}

/// Validation failure, still carrying visibility so the form can re-render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidResponse {
    pub visible_fields: Vec<FieldKey>,
    pub missing_fields: Vec<FieldKey>,
    pub error: &'static str,
    pub detail: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EstimationResponse {
    Success(Box<EstimationSuccess>),
    Invalid(InvalidResponse),
}

impl EstimationResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, EstimationResponse::Success(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
}
