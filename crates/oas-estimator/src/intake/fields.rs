use std::fmt;

use serde::Serialize;

use super::countries;
use super::domain::{FieldKey, RawAnswers};

/// Grouping used by the questionnaire to lay out sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Age,
    Income,
    Legal,
    Residence,
    Marital,
}

pub type VisibilityRule = fn(&RawAnswers) -> bool;

/// Static declaration of one question the questionnaire can ask.
#[derive(Clone, Serialize)]
pub struct FieldConfig {
    pub key: FieldKey,
    pub category: FieldCategory,
    pub order: u16,
    #[serde(skip)]
    pub depends_on: &'static [FieldKey],
    #[serde(skip)]
    visible: VisibilityRule,
}

impl FieldConfig {
    pub fn is_visible(&self, answers: &RawAnswers) -> bool {
        (self.visible)(answers)
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("key", &self.key)
            .field("category", &self.category)
            .field("order", &self.order)
            .field("depends_on", &self.depends_on)
            .finish()
    }
}

/// Every catalog question, sorted by `order`.
///
/// A rule may only read keys declared earlier in this list or supplementary
/// answers, so a single ordered pass resolves visibility.
pub fn field_catalog() -> &'static [FieldConfig] {
    &FIELD_CATALOG
}

pub fn field_config(key: FieldKey) -> Option<&'static FieldConfig> {
    FIELD_CATALOG.iter().find(|config| config.key == key)
}

static FIELD_CATALOG: [FieldConfig; 14] = [
    FieldConfig {
        key: FieldKey::Age,
        category: FieldCategory::Age,
        order: 1,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::OasDefer,
        category: FieldCategory::Age,
        order: 2,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::OasAge,
        category: FieldCategory::Age,
        order: 3,
        depends_on: &[FieldKey::OasDefer],
        visible: deferring_pension,
    },
    FieldConfig {
        key: FieldKey::Income,
        category: FieldCategory::Income,
        order: 4,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::LegalStatus,
        category: FieldCategory::Legal,
        order: 5,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::LivingCountry,
        category: FieldCategory::Residence,
        order: 6,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::LivedOutsideCanada,
        category: FieldCategory::Residence,
        order: 7,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::YearsInCanadaSince18,
        category: FieldCategory::Residence,
        order: 8,
        depends_on: &[FieldKey::LivedOutsideCanada],
        visible: lived_outside_canada,
    },
    FieldConfig {
        key: FieldKey::EverLivedSocialCountry,
        category: FieldCategory::Residence,
        order: 9,
        depends_on: &[
            FieldKey::LivingCountry,
            FieldKey::LivedOutsideCanada,
            FieldKey::YearsInCanadaSince18,
        ],
        visible: below_residency_threshold,
    },
    FieldConfig {
        key: FieldKey::MaritalStatus,
        category: FieldCategory::Marital,
        order: 10,
        depends_on: &[],
        visible: always,
    },
    FieldConfig {
        key: FieldKey::PartnerIncome,
        category: FieldCategory::Income,
        order: 11,
        depends_on: &[FieldKey::MaritalStatus],
        visible: partnered,
    },
    FieldConfig {
        key: FieldKey::PartnerBenefitStatus,
        category: FieldCategory::Marital,
        order: 12,
        depends_on: &[FieldKey::MaritalStatus],
        visible: partnered,
    },
    FieldConfig {
        key: FieldKey::PartnerYearsInCanadaSince18,
        category: FieldCategory::Residence,
        order: 13,
        depends_on: &[FieldKey::MaritalStatus, FieldKey::PartnerLivedOutsideCanada],
        visible: partner_lived_outside_canada,
    },
    FieldConfig {
        key: FieldKey::PartnerEverLivedSocialCountry,
        category: FieldCategory::Residence,
        order: 14,
        depends_on: &[
            FieldKey::LivingCountry,
            FieldKey::MaritalStatus,
            FieldKey::PartnerLivingCountry,
            FieldKey::PartnerLivedOutsideCanada,
            FieldKey::PartnerYearsInCanadaSince18,
        ],
        visible: partner_below_residency_threshold,
    },
];

fn always(_: &RawAnswers) -> bool {
    true
}

fn deferring_pension(answers: &RawAnswers) -> bool {
    answers.boolean(FieldKey::OasDefer) == Some(true)
}

fn lived_outside_canada(answers: &RawAnswers) -> bool {
    answers.boolean(FieldKey::LivedOutsideCanada) == Some(true)
}

fn below_residency_threshold(answers: &RawAnswers) -> bool {
    if !lived_outside_canada(answers) {
        return false;
    }

    let threshold = countries::residency_threshold(answers.text(FieldKey::LivingCountry));
    answers
        .number(FieldKey::YearsInCanadaSince18)
        .map(|years| years < f64::from(threshold))
        .unwrap_or(false)
}

fn partnered(answers: &RawAnswers) -> bool {
    answers.is_partnered()
}

fn partner_lived_outside_canada(answers: &RawAnswers) -> bool {
    partnered(answers) && answers.boolean(FieldKey::PartnerLivedOutsideCanada) == Some(true)
}

fn partner_below_residency_threshold(answers: &RawAnswers) -> bool {
    if !partner_lived_outside_canada(answers) {
        return false;
    }

    // the partner usually shares the applicant's country unless told otherwise
    let country = answers
        .text(FieldKey::PartnerLivingCountry)
        .or_else(|| answers.text(FieldKey::LivingCountry));
    let threshold = countries::residency_threshold(country);
    answers
        .number(FieldKey::PartnerYearsInCanadaSince18)
        .map(|years| years < f64::from(threshold))
        .unwrap_or(false)
}
