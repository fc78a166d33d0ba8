use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::intake::domain::{FieldKey, Language, RawAnswers};
use crate::intake::evaluator::{
    BenefitEvaluator, BenefitKey, BenefitOutcome, BenefitOutcomes, EligibilityResult,
    EntitlementResult, EntitlementResultType, EvaluatorError, ResultKey, ResultReason,
};
use crate::intake::normalizer::ProcessedInput;
use crate::intake::reference::ReferenceEvaluator;
use crate::intake::service::EstimationService;
use crate::intake::translations::{TranslationCatalog, Translations};
use crate::intake::validation::ValidationSchema;
use crate::intake::estimation_router;

pub(super) const REFERENCE_YEAR: i32 = 2024;

pub(super) fn schema() -> ValidationSchema {
    ValidationSchema::for_year(REFERENCE_YEAR)
}

/// Canadian citizen, 67, never lived abroad, single.
pub(super) fn single_answers() -> RawAnswers {
    RawAnswers::new()
        .with(FieldKey::Age, 67.0)
        .with(FieldKey::OasDefer, false)
        .with(FieldKey::Income, 20_000.0)
        .with(FieldKey::LegalStatus, "canadianCitizen")
        .with(FieldKey::LivingCountry, "CAN")
        .with(FieldKey::LivedOutsideCanada, false)
        .with(FieldKey::MaritalStatus, "single")
}

/// Same applicant with a partner who already receives OAS and GIS.
pub(super) fn partnered_answers() -> RawAnswers {
    single_answers()
        .with(FieldKey::MaritalStatus, "partnered")
        .with(FieldKey::PartnerIncome, 10_000.0)
        .with(FieldKey::PartnerBenefitStatus, "oasGis")
        .with(FieldKey::PartnerAge, 66.0)
        .with(FieldKey::PartnerLegalStatus, "canadianCitizen")
        .with(FieldKey::PartnerLivingCountry, "CAN")
        .with(FieldKey::PartnerLivedOutsideCanada, false)
}

/// Applicant who lived abroad; `years` since 18 spent in `country`.
pub(super) fn abroad_answers(country: &str, years: u32) -> RawAnswers {
    single_answers()
        .with(FieldKey::LivingCountry, country)
        .with(FieldKey::LivedOutsideCanada, true)
        .with(FieldKey::YearsInCanadaSince18, years)
}

pub(super) fn translations() -> Arc<Translations> {
    let en = TranslationCatalog::from_entries(
        Language::En,
        [
            ("detail.eligible", "You are likely eligible for this benefit."),
            ("detail.expectToReceive", "You can expect to receive:"),
            ("summary.title.MORE_INFO", "More information needed"),
            ("summary.title.AVAILABLE_ELIGIBLE", "Likely eligible"),
            ("links.apply.oas.text", "Apply for OAS"),
            ("links.apply.oas.url", "https://example.ca/oas/apply"),
        ],
    );
    let fr = TranslationCatalog::from_entries(
        Language::Fr,
        [
            ("detail.eligible", "Vous êtes probablement admissible."),
            ("summary.title.MORE_INFO", "Plus de renseignements requis"),
        ],
    );
    Arc::new(Translations::new(en, fr))
}

pub(super) fn build_service() -> EstimationService<ReferenceEvaluator> {
    EstimationService::new(
        Arc::new(ReferenceEvaluator::default()),
        translations(),
        schema(),
    )
}

pub(super) fn service_with<E: BenefitEvaluator + 'static>(evaluator: E) -> EstimationService<E> {
    EstimationService::new(Arc::new(evaluator), translations(), schema())
}

pub(super) fn router_with_service<E: BenefitEvaluator + 'static>(
    service: EstimationService<E>,
) -> axum::Router {
    estimation_router(Arc::new(service))
}

pub(super) fn outcome(result: ResultKey, amount: f64) -> BenefitOutcome {
    BenefitOutcome {
        eligibility: EligibilityResult::new(result, ResultReason::None, "detail.eligible"),
        entitlement: EntitlementResult {
            result: amount,
            kind: if amount > 0.0 {
                EntitlementResultType::Full
            } else {
                EntitlementResultType::None
            },
            auto_enrollment: false,
            clawback: 0.0,
        },
    }
}

/// Returns fixed outcomes and remembers every input it was handed.
#[derive(Default)]
pub(super) struct RecordingEvaluator {
    outcomes: BenefitOutcomes,
    inputs: Mutex<Vec<ProcessedInput>>,
}

impl RecordingEvaluator {
    pub(super) fn returning(entries: Vec<(BenefitKey, BenefitOutcome)>) -> Self {
        let mut outcomes = BenefitOutcomes::new();
        for (key, outcome) in entries {
            outcomes.insert(key, outcome);
        }
        Self {
            outcomes,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn inputs(&self) -> Vec<ProcessedInput> {
        self.inputs.lock().expect("inputs mutex").clone()
    }
}

impl BenefitEvaluator for RecordingEvaluator {
    fn evaluate(&self, input: &ProcessedInput) -> Result<BenefitOutcomes, EvaluatorError> {
        self.inputs.lock().expect("inputs mutex").push(input.clone());
        Ok(self.outcomes.clone())
    }
}

pub(super) struct FailingEvaluator(pub(super) EvaluatorError);

impl BenefitEvaluator for FailingEvaluator {
    fn evaluate(&self, _input: &ProcessedInput) -> Result<BenefitOutcomes, EvaluatorError> {
        Err(self.0.clone())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
