use super::common::*;
use crate::intake::domain::{
    FieldKey, LegalStatus, MaritalStatus, PartnerBenefitStatus, RawAnswers,
};
use crate::intake::requirements::resolve;
use crate::intake::validation::{FieldError, ValidationErrorCode as Code};

fn codes_for(answers: &RawAnswers) -> Vec<Code> {
    schema()
        .validate(answers)
        .expect_err("answers should be rejected")
        .codes()
}

#[test]
fn complete_single_applicant_validates() {
    let validated = schema().validate(&single_answers()).expect("valid answers");

    assert_eq!(validated.age, 67.0);
    assert_eq!(validated.legal_status, LegalStatus::CanadianCitizen);
    assert_eq!(validated.marital_status, MaritalStatus::Single);
    assert_eq!(validated.living_country, "CAN");
    assert!(!validated.inv_separated);
    assert!(validated.partner.is_none());
}

#[test]
fn absent_fields_report_their_empty_codes_in_field_order() {
    let errors = schema()
        .validate(&RawAnswers::new())
        .expect_err("nothing answered");

    assert_eq!(
        errors.errors(),
        &[
            FieldError {
                field: FieldKey::Age,
                code: Code::InvalidAge
            },
            FieldError {
                field: FieldKey::OasDefer,
                code: Code::OasDeferEmpty
            },
            FieldError {
                field: FieldKey::Income,
                code: Code::IncomeEmpty
            },
            FieldError {
                field: FieldKey::LegalStatus,
                code: Code::LegalStatusNotSelected
            },
            FieldError {
                field: FieldKey::LivingCountry,
                code: Code::LivingCountryNotSelected
            },
            FieldError {
                field: FieldKey::LivedOutsideCanada,
                code: Code::OnlyInCanadaEmpty
            },
            FieldError {
                field: FieldKey::MaritalStatus,
                code: Code::MaritalStatusEmpty
            },
        ]
    );
}

#[test]
fn age_checks_birth_year_before_adulthood() {
    let answers = single_answers().with(FieldKey::Age, 17.0);
    assert_eq!(codes_for(&answers), vec![Code::AgeUnder18]);

    let answers = single_answers().with(FieldKey::Age, 130.0);
    assert_eq!(codes_for(&answers), vec![Code::InvalidAge]);

    let answers = single_answers().with(FieldKey::Age, -1.0);
    assert_eq!(codes_for(&answers), vec![Code::InvalidAge]);

    let answers = single_answers().with(FieldKey::Age, 125.0);
    assert!(schema().validate(&answers).is_ok());
}

#[test]
fn errors_from_several_fields_are_collected_together() {
    let answers = single_answers()
        .with(FieldKey::Age, 17.0)
        .with(FieldKey::Income, -1.0)
        .with(FieldKey::MaritalStatus, "divorced");

    let errors = schema().validate(&answers).expect_err("three violations");
    assert_eq!(
        errors.codes(),
        vec![Code::AgeUnder18, Code::IncomeBelowZero, Code::MaritalUnavailable]
    );
    assert_eq!(errors.for_field(FieldKey::Income), vec![Code::IncomeBelowZero]);
}

#[test]
fn work_income_cannot_exceed_net_income() {
    let answers = single_answers().with(FieldKey::IncomeWork, 30_000.0);
    assert_eq!(codes_for(&answers), vec![Code::IncomeWorkGreaterThanNetIncome]);

    let answers = single_answers().with(FieldKey::IncomeWork, 12_000.0);
    let validated = schema().validate(&answers).expect("work income within net");
    assert_eq!(validated.income_work, Some(12_000.0));
}

#[test]
fn deferred_start_age_must_be_between_65_and_70() {
    let answers = single_answers()
        .with(FieldKey::OasDefer, true)
        .with(FieldKey::OasAge, 72.0);
    assert_eq!(codes_for(&answers), vec![Code::OasAge65to70]);

    let answers = single_answers()
        .with(FieldKey::OasDefer, true)
        .with(FieldKey::OasAge, 70.0);
    assert_eq!(
        schema().validate(&answers).expect("valid deferral").oas_age,
        Some(70.0)
    );
}

#[test]
fn hidden_answers_are_dropped() {
    let answers = single_answers().with(FieldKey::OasAge, 99.0);
    let validated = schema().validate(&answers).expect("hidden start age ignored");
    assert_eq!(validated.oas_age, None);
}

#[test]
fn legal_status_distinguishes_unsupported_from_unknown() {
    let answers = single_answers().with(FieldKey::LegalStatus, "no");
    assert_eq!(codes_for(&answers), vec![Code::LegalUnavailable]);

    let answers = single_answers().with(FieldKey::LegalStatus, "tourist");
    assert_eq!(codes_for(&answers), vec![Code::LegalStatusNotSelected]);
}

#[test]
fn unrecognized_country_is_not_selected() {
    let answers = single_answers().with(FieldKey::LivingCountry, "Canada");
    assert_eq!(codes_for(&answers), vec![Code::LivingCountryNotSelected]);
}

#[test]
fn years_in_canada_cannot_exceed_adult_years() {
    let answers = abroad_answers("CAN", 50);
    assert_eq!(codes_for(&answers), vec![Code::YearsInCanadaMinusAge]);

    let answers = abroad_answers("CAN", 49);
    let validated = schema().validate(&answers).expect("49 adult years at 67");
    assert_eq!(validated.years_in_canada_since_18, Some(49));
}

#[test]
fn fractional_years_are_rejected() {
    let answers = single_answers()
        .with(FieldKey::LivedOutsideCanada, true)
        .with(FieldKey::YearsInCanadaSince18, 12.5);
    assert_eq!(codes_for(&answers), vec![Code::YearsInCanadaMinusAge]);
}

#[test]
fn social_country_answer_selects_the_error_code() {
    let lived_in_agreement_country =
        abroad_answers("CAN", 5).with(FieldKey::EverLivedSocialCountry, true);
    assert_eq!(
        codes_for(&lived_in_agreement_country),
        vec![Code::SocialCountryUnavailable10]
    );

    let never_lived_abroad =
        abroad_answers("CAN", 5).with(FieldKey::EverLivedSocialCountry, false);
    assert_eq!(
        codes_for(&never_lived_abroad),
        vec![Code::YearsInCanadaNotEnough10]
    );

    let abroad = abroad_answers("USA", 15).with(FieldKey::EverLivedSocialCountry, true);
    assert_eq!(codes_for(&abroad), vec![Code::SocialCountryUnavailable20]);

    let abroad = abroad_answers("USA", 15).with(FieldKey::EverLivedSocialCountry, false);
    assert_eq!(codes_for(&abroad), vec![Code::YearsInCanadaNotEnough20]);
}

#[test]
fn both_residency_checks_report_one_code() {
    let answers = abroad_answers("CAN", 9)
        .with(FieldKey::YearsInCanadaSinceOas, 3u32)
        .with(FieldKey::EverLivedSocialCountry, false);

    let errors = schema().validate(&answers).expect_err("below threshold");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.for_field(FieldKey::EverLivedSocialCountry),
        vec![Code::YearsInCanadaNotEnough10]
    );
}

#[test]
fn years_since_oas_start_are_checked_when_the_question_is_hidden() {
    let answers = abroad_answers("CAN", 30)
        .with(FieldKey::YearsInCanadaSinceOas, 3u32)
        .with(FieldKey::EverLivedSocialCountry, true);
    assert!(!resolve(&answers).is_visible(FieldKey::EverLivedSocialCountry));

    let errors = schema().validate(&answers).expect_err("below threshold since OAS");
    assert_eq!(
        errors.for_field(FieldKey::EverLivedSocialCountry),
        vec![Code::SocialCountryUnavailable10]
    );

    let answers = answers.with(FieldKey::EverLivedSocialCountry, false);
    assert_eq!(codes_for(&answers), vec![Code::YearsInCanadaNotEnough10]);
}

#[test]
fn hidden_social_country_answer_is_kept_when_residency_is_sufficient() {
    let answers = abroad_answers("CAN", 30).with(FieldKey::EverLivedSocialCountry, true);
    let validated = schema().validate(&answers).expect("enough years in Canada");
    assert_eq!(validated.ever_lived_social_country, Some(true));
}

#[test]
fn partner_answers_validate_with_partner_codes() {
    let validated = schema()
        .validate(&partnered_answers())
        .expect("valid household");
    let partner = validated.partner.expect("partner present");
    assert_eq!(partner.benefit_status, PartnerBenefitStatus::OasGis);
    assert_eq!(partner.age, Some(66.0));

    let answers = partnered_answers()
        .with(FieldKey::PartnerIncomeWork, 15_000.0)
        .with(FieldKey::PartnerAge, 16.0);
    assert_eq!(
        codes_for(&answers),
        vec![
            Code::PartnerIncomeWorkGreaterThanNetIncome,
            Code::PartnerAgeUnder18
        ]
    );

    let answers = partnered_answers().with(FieldKey::PartnerIncome, -10.0);
    assert_eq!(codes_for(&answers), vec![Code::PartnerIncomeBelowZero]);

    let answers = partnered_answers().with(FieldKey::PartnerBenefitStatus, "pension");
    assert_eq!(codes_for(&answers), vec![Code::PartnerBenefitStatusEmpty]);
}

#[test]
fn partner_years_are_bounded_by_partner_age() {
    let answers = partnered_answers()
        .with(FieldKey::PartnerLivedOutsideCanada, true)
        .with(FieldKey::PartnerYearsInCanadaSince18, 49u32);
    assert_eq!(codes_for(&answers), vec![Code::PartnerYearsInCanadaMinusAge]);
}

#[test]
fn partner_supplements_are_ignored_for_single_applicants() {
    let answers = single_answers().with(FieldKey::PartnerAge, 5.0);
    let validated = schema().validate(&answers).expect("partner age ignored");
    assert!(validated.partner.is_none());
}

#[test]
fn wrong_primitive_types_map_to_empty_codes() {
    let answers = single_answers().with(FieldKey::OasDefer, "no");
    assert_eq!(codes_for(&answers), vec![Code::OasDeferEmpty]);
}

#[test]
fn validation_errors_serialize_as_field_code_pairs() {
    let errors = schema()
        .validate(&single_answers().with(FieldKey::Income, -1.0))
        .expect_err("negative income");
    let json = serde_json::to_value(&errors).expect("serializes");
    assert_eq!(
        json,
        serde_json::json!([{ "field": "income", "code": "incomeBelowZero" }])
    );
}
