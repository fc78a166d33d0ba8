use super::common::*;
use crate::intake::domain::{FieldKey, RawAnswers};
use crate::intake::fields::field_catalog;
use crate::intake::requirements::{resolve, SummaryState};

const BASE_FIELDS: [FieldKey; 7] = [
    FieldKey::Age,
    FieldKey::OasDefer,
    FieldKey::Income,
    FieldKey::LegalStatus,
    FieldKey::LivingCountry,
    FieldKey::LivedOutsideCanada,
    FieldKey::MaritalStatus,
];

#[test]
fn empty_answers_ask_for_every_base_field_in_catalog_order() {
    let requirements = resolve(&RawAnswers::new());

    assert_eq!(requirements.visible, BASE_FIELDS.to_vec());
    assert_eq!(requirements.missing, BASE_FIELDS.to_vec());
    assert_eq!(requirements.state(), Some(SummaryState::MoreInfo));
}

#[test]
fn complete_single_applicant_has_nothing_missing() {
    let requirements = resolve(&single_answers());

    assert!(requirements.is_complete());
    assert_eq!(requirements.state(), None);
    assert_eq!(requirements.visible, BASE_FIELDS.to_vec());
}

#[test]
fn short_residence_asks_about_agreement_countries_last() {
    let requirements = resolve(&abroad_answers("CAN", 5));

    assert_eq!(requirements.missing, vec![FieldKey::EverLivedSocialCountry]);
    assert!(requirements.is_visible(FieldKey::YearsInCanadaSince18));
}

#[test]
fn social_country_waits_for_years_in_canada() {
    let answers = single_answers().with(FieldKey::LivedOutsideCanada, true);
    let requirements = resolve(&answers);

    assert_eq!(requirements.missing, vec![FieldKey::YearsInCanadaSince18]);
    assert!(!requirements.is_visible(FieldKey::EverLivedSocialCountry));
}

#[test]
fn resolving_twice_yields_identical_output() {
    let answers = abroad_answers("USA", 12);
    assert_eq!(resolve(&answers), resolve(&answers));
}

#[test]
fn canadian_residents_use_a_ten_year_threshold() {
    assert!(resolve(&abroad_answers("CAN", 9)).is_visible(FieldKey::EverLivedSocialCountry));
    assert!(!resolve(&abroad_answers("CAN", 10)).is_visible(FieldKey::EverLivedSocialCountry));
}

#[test]
fn residents_abroad_use_a_twenty_year_threshold() {
    assert!(resolve(&abroad_answers("USA", 19)).is_visible(FieldKey::EverLivedSocialCountry));
    assert!(!resolve(&abroad_answers("USA", 20)).is_visible(FieldKey::EverLivedSocialCountry));
}

#[test]
fn partnered_applicant_is_asked_for_partner_income_and_benefits() {
    let answers = single_answers().with(FieldKey::MaritalStatus, "partnered");
    let requirements = resolve(&answers);

    assert_eq!(
        requirements.missing,
        vec![FieldKey::PartnerIncome, FieldKey::PartnerBenefitStatus]
    );
}

#[test]
fn deferring_pension_reveals_start_age() {
    let answers = single_answers().with(FieldKey::OasDefer, true);
    let requirements = resolve(&answers);

    assert_eq!(requirements.missing, vec![FieldKey::OasAge]);
}

#[test]
fn partner_residency_mirrors_applicant_rules() {
    let answers = partnered_answers().with(FieldKey::PartnerLivedOutsideCanada, true);
    assert_eq!(
        resolve(&answers).missing,
        vec![FieldKey::PartnerYearsInCanadaSince18]
    );

    let mut answers = answers.with(FieldKey::PartnerYearsInCanadaSince18, 5u32);
    answers.remove(FieldKey::PartnerLivingCountry);
    assert_eq!(
        resolve(&answers).missing,
        vec![FieldKey::PartnerEverLivedSocialCountry]
    );

    let answers = answers
        .with(FieldKey::PartnerLivingCountry, "USA")
        .with(FieldKey::PartnerYearsInCanadaSince18, 15u32);
    assert!(resolve(&answers).is_visible(FieldKey::PartnerEverLivedSocialCountry));
}

#[test]
fn single_applicants_never_see_partner_questions() {
    let answers = single_answers().with(FieldKey::PartnerLivedOutsideCanada, true);
    let requirements = resolve(&answers);

    assert!(requirements
        .visible
        .iter()
        .all(|key| !key.name().starts_with("partner")));
}

#[test]
fn catalog_dependencies_point_backwards() {
    let catalog = field_catalog();

    for (index, config) in catalog.iter().enumerate() {
        for dependency in config.depends_on {
            let declared_earlier = catalog[..index].iter().any(|c| c.key == *dependency);
            assert!(
                declared_earlier || dependency.is_supplementary(),
                "{} depends on {} which is declared later",
                config.key,
                dependency
            );
        }
    }

    assert!(catalog
        .windows(2)
        .all(|pair| pair[0].order < pair[1].order));
}
