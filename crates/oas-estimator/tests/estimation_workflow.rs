use std::path::PathBuf;
use std::sync::Arc;

use oas_estimator::intake::{
    BenefitKey, EstimationRequest, EstimationResponse, EstimationService, EstimationSuccess,
    EntitlementResultType, FieldKey, Language, RawAnswers, ReferenceEvaluator, ResultKey,
    ResultReason, SummaryState, Translations, ValidationSchema,
};
use serde_json::json;

fn translations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../translations")
}

fn service() -> EstimationService<ReferenceEvaluator> {
    let translations = Translations::load(&translations_dir()).expect("translation tables load");
    EstimationService::new(
        Arc::new(ReferenceEvaluator::default()),
        Arc::new(translations),
        ValidationSchema::for_year(2024),
    )
}

fn base_answers(age: f64, marital_status: &str) -> RawAnswers {
    RawAnswers::new()
        .with(FieldKey::Age, age)
        .with(FieldKey::OasDefer, false)
        .with(FieldKey::Income, 10_000.0)
        .with(FieldKey::LegalStatus, "permanentResident")
        .with(FieldKey::LivingCountry, "CAN")
        .with(FieldKey::LivedOutsideCanada, false)
        .with(FieldKey::MaritalStatus, marital_status)
}

fn estimate(answers: &RawAnswers, language: Language) -> EstimationSuccess {
    match service().process(answers, language).expect("estimation runs") {
        EstimationResponse::Success(success) => *success,
        EstimationResponse::Invalid(invalid) => panic!("unexpected validation errors: {invalid:?}"),
    }
}

#[test]
fn questionnaire_converges_as_answers_arrive() {
    let mut answers = RawAnswers::new();
    let first = estimate(&answers, Language::En);
    assert_eq!(first.summary.state, SummaryState::MoreInfo);
    assert_eq!(first.missing_fields.len(), 7);

    for (key, value) in base_answers(70.0, "single").iter() {
        answers.insert(key, value.clone());
    }
    let done = estimate(&answers, Language::En);
    assert!(done.missing_fields.is_empty());
    assert_eq!(done.summary.state, SummaryState::AvailableEligible);
    assert_eq!(done.summary.title, "Likely eligible");
}

#[test]
fn residence_abroad_prorates_oas_and_blocks_gis() {
    let answers = base_answers(70.0, "single")
        .with(FieldKey::LivingCountry, "USA")
        .with(FieldKey::LivedOutsideCanada, true)
        .with(FieldKey::YearsInCanadaSince18, 25u32);

    let success = estimate(&answers, Language::En);

    let oas = &success.results[&BenefitKey::Oas];
    assert_eq!(oas.eligibility.result, ResultKey::Eligible);
    assert_eq!(oas.entitlement.kind, EntitlementResultType::Partial);
    assert!((oas.entitlement.result - 445.84).abs() < 0.01);

    let gis = &success.results[&BenefitKey::Gis];
    assert_eq!(gis.eligibility.result, ResultKey::Ineligible);
    assert_eq!(gis.eligibility.reason, ResultReason::LivingCountry);
    assert_eq!(
        gis.card_detail.main_text,
        "You must live in Canada to be eligible for this benefit."
    );
}

#[test]
fn widowed_applicant_under_65_gets_the_survivor_allowance_and_a_projection() {
    let success = estimate(&base_answers(62.0, "widowed"), Language::En);

    assert_eq!(
        success.results[&BenefitKey::Alws].eligibility.result,
        ResultKey::Eligible
    );
    assert_eq!(
        success.results[&BenefitKey::Oas].eligibility.reason,
        ResultReason::AgeYoung
    );
    assert_eq!(success.summary.state, SummaryState::AvailableEligible);
    assert!((success.summary.entitlement_sum - 1_614.88).abs() < 0.01);

    let future_oas = &success.future_client_results[&BenefitKey::Oas];
    assert_eq!(future_oas.eligibility.result, ResultKey::Eligible);
    assert!(future_oas
        .card_detail
        .meta
        .table_data
        .as_ref()
        .is_some_and(|rows| !rows.is_empty()));
}

#[test]
fn undecided_partner_benefit_leaves_the_allowance_income_dependent() {
    let answers = base_answers(62.0, "partnered")
        .with(FieldKey::PartnerIncome, 8_000.0)
        .with(FieldKey::PartnerBenefitStatus, "helpMe");

    let success = estimate(&answers, Language::Fr);

    assert_eq!(
        success.results[&BenefitKey::Alw].eligibility.result,
        ResultKey::IncomeDependent
    );
    assert_eq!(success.summary.state, SummaryState::AvailableDepending);
    assert_eq!(
        success.summary.title,
        "L'admissibilité dépend de votre situation"
    );
    assert!(success.partner_results.is_empty());
    assert_eq!(success.summary.partner_state, SummaryState::Unavailable);
}

#[test]
fn json_requests_produce_camel_case_responses() {
    let request = EstimationRequest::from_json(&json!({
        "age": 67,
        "oasDefer": false,
        "income": 20000,
        "legalStatus": "canadianCitizen",
        "livingCountry": "CAN",
        "livedOutsideCanada": false,
        "maritalStatus": "single",
        "_language": "en"
    }))
    .expect("request parses");

    let response = service()
        .process(&request.answers, request.language)
        .expect("estimation runs");
    let body = serde_json::to_value(&response).expect("response serializes");

    assert_eq!(body["summary"]["state"], "AVAILABLE_ELIGIBLE");
    assert_eq!(body["results"]["gis"]["benefitKey"], "gis");
    assert_eq!(body["visibleFields"][0], "age");
    assert!(body["futureClientResults"].as_object().is_some());
    assert_eq!(body["fieldData"].as_array().map(Vec::len), Some(14));
}

#[test]
fn every_summary_state_has_a_translated_title() {
    let translations = Translations::load(&translations_dir()).expect("translation tables load");
    for language in [Language::En, Language::Fr] {
        let catalog = translations.catalog(language);
        for state in [
            SummaryState::MoreInfo,
            SummaryState::Unavailable,
            SummaryState::AvailableEligible,
            SummaryState::AvailableIneligible,
            SummaryState::AvailableDepending,
        ] {
            let key = format!("summary.title.{}", state.as_str());
            assert_ne!(catalog.text(&key), key, "{language:?} lacks {key}");
        }
    }
}
