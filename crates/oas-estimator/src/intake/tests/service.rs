use std::sync::Arc;

use super::common::*;
use crate::intake::cards::{benefit_result, CardContext};
use crate::intake::domain::{FieldKey, Language, RawAnswers};
use crate::intake::evaluator::{BenefitKey, EvaluatorError, ResultKey};
use crate::intake::normalizer::normalize;
use crate::intake::reference::{ReferenceEvaluator, ReferenceRates};
use crate::intake::requirements::SummaryState;
use crate::intake::service::{EstimationError, EstimationResponse, EstimationService};
use crate::intake::summary::{entitlement_sum, summary_state, BenefitResults};
use crate::intake::translations::TranslationCatalog;
use crate::intake::validation::ValidationErrorCode;

fn results_with(outcomes: &[(BenefitKey, ResultKey, f64)]) -> BenefitResults {
    let input = normalize(&schema().validate(&single_answers()).expect("valid"));
    let catalog = TranslationCatalog::default();
    outcomes
        .iter()
        .map(|(benefit, result, amount)| {
            let outcome = outcome(*result, *amount);
            let context = CardContext {
                benefit: *benefit,
                outcome: &outcome,
                input: &input,
                partner: false,
                future: false,
            };
            (*benefit, benefit_result(context, &catalog))
        })
        .collect()
}

#[test]
fn incomplete_answers_return_more_info_without_evaluating() {
    let evaluator = Arc::new(RecordingEvaluator::default());
    let service = EstimationService::new(evaluator.clone(), translations(), schema());

    let answers = single_answers().with(FieldKey::MaritalStatus, "partnered");
    let response = service
        .process(&answers, Language::En)
        .expect("processing succeeds");

    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    assert_eq!(success.summary.state, SummaryState::MoreInfo);
    assert_eq!(success.summary.title, "More information needed");
    assert_eq!(
        success.missing_fields,
        vec![FieldKey::PartnerIncome, FieldKey::PartnerBenefitStatus]
    );
    assert!(success.results.is_empty());
    assert_eq!(success.field_data.len(), 14);
    assert!(evaluator.inputs().is_empty());
}

#[test]
fn more_info_title_follows_the_requested_language() {
    let response = build_service()
        .process(&RawAnswers::new(), Language::Fr)
        .expect("processing succeeds");

    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    assert_eq!(success.summary.title, "Plus de renseignements requis");
}

#[test]
fn invalid_answers_keep_field_visibility() {
    let answers = single_answers().with(FieldKey::Income, -5.0);
    let response = build_service()
        .process(&answers, Language::En)
        .expect("processing succeeds");

    assert!(!response.is_success());
    let EstimationResponse::Invalid(invalid) = response else {
        panic!("expected validation failure");
    };
    assert_eq!(invalid.error, "INVALID");
    assert_eq!(invalid.visible_fields.len(), 7);
    assert!(invalid.missing_fields.is_empty());
    assert_eq!(invalid.detail[0].code, ValidationErrorCode::IncomeBelowZero);
}

#[test]
fn eligible_single_applicant_is_summarized() {
    let response = build_service()
        .process(&single_answers(), Language::En)
        .expect("processing succeeds");

    assert!(response.is_success());
    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    let oas = &success.results[&BenefitKey::Oas];
    assert_eq!(oas.eligibility.result, ResultKey::Eligible);
    assert!((oas.entitlement.result - 713.34).abs() < 0.01);
    assert_eq!(success.results[&BenefitKey::Gis].eligibility.result, ResultKey::Eligible);
    assert_eq!(success.results[&BenefitKey::Alw].eligibility.result, ResultKey::Ineligible);

    assert_eq!(success.summary.state, SummaryState::AvailableEligible);
    assert_eq!(success.summary.title, "Likely eligible");
    assert!((success.summary.entitlement_sum - 1_778.81).abs() < 0.01);
    assert_eq!(success.summary.partner_state, SummaryState::Unavailable);
    assert!(success.future_client_results.is_empty());
    assert!(success.partner_results.is_empty());

    assert!(oas.card_detail.main_text.starts_with("You are likely eligible"));
    assert_eq!(oas.card_detail.links[0].text, "Apply for OAS");
}

#[test]
fn partner_mirror_is_evaluated_as_an_applicant() {
    let evaluator = RecordingEvaluator::returning(vec![(
        BenefitKey::Oas,
        outcome(ResultKey::Eligible, 700.0),
    )]);
    let service = service_with(evaluator);

    let response = service
        .process(&partnered_answers(), Language::En)
        .expect("processing succeeds");
    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    assert_eq!(success.summary.partner_state, SummaryState::AvailableEligible);
    assert_eq!(success.summary.partner_entitlement_sum, 700.0);
}

#[test]
fn younger_applicants_receive_results_at_65() {
    let evaluator = Arc::new(RecordingEvaluator::returning(vec![(
        BenefitKey::Oas,
        outcome(ResultKey::Ineligible, 0.0),
    )]));
    let service = EstimationService::new(evaluator.clone(), translations(), schema());

    let answers = single_answers().with(FieldKey::Age, 60.0);
    let response = service
        .process(&answers, Language::En)
        .expect("processing succeeds");
    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };

    assert_eq!(success.future_client_results.len(), 1);
    let ages: Vec<f64> = evaluator.inputs().iter().map(|input| input.age).collect();
    assert_eq!(ages, vec![60.0, 65.0]);
}

#[test]
fn evaluator_failures_are_surfaced() {
    let service = service_with(FailingEvaluator(EvaluatorError::Failed(
        "rates unavailable".to_string(),
    )));

    match service.process(&single_answers(), Language::En) {
        Err(EstimationError::Evaluator(EvaluatorError::Failed(message))) => {
            assert_eq!(message, "rates unavailable");
        }
        other => panic!("expected evaluator failure, got {other:?}"),
    }
}

#[test]
fn legal_status_other_makes_every_benefit_unavailable() {
    let answers = single_answers().with(FieldKey::LegalStatus, "other");
    let response = build_service()
        .process(&answers, Language::En)
        .expect("processing succeeds");

    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    assert_eq!(success.results.len(), 4);
    assert_eq!(success.summary.state, SummaryState::Unavailable);
}

#[test]
fn summary_state_precedence() {
    assert_eq!(summary_state(&BenefitResults::new()), SummaryState::Unavailable);

    let mixed = results_with(&[
        (BenefitKey::Oas, ResultKey::Eligible, 700.0),
        (BenefitKey::Gis, ResultKey::Unavailable, 0.0),
    ]);
    assert_eq!(summary_state(&mixed), SummaryState::Unavailable);

    let eligible = results_with(&[
        (BenefitKey::Oas, ResultKey::Eligible, 700.0),
        (BenefitKey::Alw, ResultKey::IncomeDependent, 0.0),
    ]);
    assert_eq!(summary_state(&eligible), SummaryState::AvailableEligible);
    assert_eq!(entitlement_sum(&eligible), 700.0);

    let depending = results_with(&[
        (BenefitKey::Oas, ResultKey::Ineligible, 0.0),
        (BenefitKey::Alw, ResultKey::IncomeDependent, 0.0),
    ]);
    assert_eq!(summary_state(&depending), SummaryState::AvailableDepending);

    let ineligible = results_with(&[(BenefitKey::Oas, ResultKey::Ineligible, 0.0)]);
    assert_eq!(summary_state(&ineligible), SummaryState::AvailableIneligible);
}

#[test]
fn configured_rates_drive_the_reference_evaluator() {
    let rates = ReferenceRates {
        gis_single_ceiling: 15_000.0,
        ..ReferenceRates::default()
    };
    let service = EstimationService::new(
        Arc::new(ReferenceEvaluator::new(rates)),
        translations(),
        schema(),
    );

    let response = service
        .process(&single_answers(), Language::En)
        .expect("processing succeeds");
    let EstimationResponse::Success(success) = response else {
        panic!("expected success response");
    };
    let gis = &success.results[&BenefitKey::Gis];
    assert_eq!(gis.eligibility.result, ResultKey::Ineligible);
    assert!((success.summary.entitlement_sum - 713.34).abs() < 0.01);
}
