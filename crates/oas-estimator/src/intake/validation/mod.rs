mod errors;
mod rules;

pub use errors::{FieldError, ValidationErrorCode, ValidationErrors};

use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::debug;

use super::domain::{
    FieldKey, FieldValue, LegalStatus, MaritalStatus, PartnerBenefitStatus, RawAnswers,
};
use super::requirements::{FieldRequirements, RequirementResolver};

/// Answers that passed every rule. Only [`ValidationSchema::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct ValidatedAnswers {
    pub age: f64,
    pub oas_defer: bool,
    pub oas_age: Option<f64>,
    pub income: f64,
    pub income_work: Option<f64>,
    pub legal_status: LegalStatus,
    pub living_country: String,
    pub lived_outside_canada: bool,
    pub years_in_canada_since_18: Option<u32>,
    pub years_in_canada_since_oas: Option<u32>,
    pub ever_lived_social_country: Option<bool>,
    pub marital_status: MaritalStatus,
    pub inv_separated: bool,
    pub partner: Option<ValidatedPartner>,
}

/// Partner answers, present only for partnered applicants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct ValidatedPartner {
    pub income: f64,
    pub income_work: Option<f64>,
    pub benefit_status: PartnerBenefitStatus,
    pub age: Option<f64>,
    pub legal_status: Option<LegalStatus>,
    pub living_country: Option<String>,
    pub lived_outside_canada: Option<bool>,
    pub years_in_canada_since_18: Option<u32>,
    pub ever_lived_social_country: Option<bool>,
}

/// Type, range, and cross-field rules for a complete answer set.
#[derive(Debug, Clone, Copy)]
pub struct ValidationSchema {
    year: i32,
    resolver: RequirementResolver,
}

impl ValidationSchema {
    /// Age rules are evaluated relative to `year`.
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            resolver: RequirementResolver::default(),
        }
    }

    pub fn current() -> Self {
        Self::for_year(Local::now().year())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn validate(&self, answers: &RawAnswers) -> Result<ValidatedAnswers, ValidationErrors> {
        let requirements = self.resolver.resolve(answers);
        self.validate_resolved(answers, &requirements)
    }

    /// Validates against requirements the caller already resolved for `answers`.
    pub fn validate_resolved(
        &self,
        answers: &RawAnswers,
        requirements: &FieldRequirements,
    ) -> Result<ValidatedAnswers, ValidationErrors> {
        let partnered = answers.is_partnered();
        let mut errors = ValidationErrors::default();
        let mut draft = Draft::default();

        for key in FieldKey::ALL {
            if !applies(key, answers, requirements, partnered) {
                continue;
            }

            let Some(value) = answers.get(key) else {
                if !key.is_supplementary() {
                    errors.push(key, rules::empty_code(key));
                }
                continue;
            };

            if let Err(code) = self.check(key, value, answers, &mut draft) {
                errors.push(key, code);
            }
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "answer set rejected");
            return Err(errors);
        }

        draft.finish(partnered)
    }

    fn check(
        &self,
        key: FieldKey,
        value: &FieldValue,
        answers: &RawAnswers,
        draft: &mut Draft,
    ) -> Result<(), ValidationErrorCode> {
        match key {
            FieldKey::Age => draft.age = Some(rules::age(value, key, self.year)?),
            FieldKey::OasDefer => draft.oas_defer = Some(rules::boolean(value, key)?),
            FieldKey::OasAge => draft.oas_age = Some(rules::oas_age(value)?),
            FieldKey::Income => draft.income = Some(rules::income(value, key)?),
            FieldKey::IncomeWork => {
                draft.income_work = Some(rules::work_income(value, key, answers)?)
            }
            FieldKey::LegalStatus => {
                draft.legal_status = Some(rules::legal_status(value, key)?)
            }
            FieldKey::LivingCountry => draft.living_country = Some(rules::country(value, key)?),
            FieldKey::LivedOutsideCanada => {
                draft.lived_outside_canada = Some(rules::boolean(value, key)?)
            }
            FieldKey::YearsInCanadaSince18 => {
                draft.years_since_18 = Some(rules::years_in_canada(value, key, answers)?)
            }
            FieldKey::YearsInCanadaSinceOas => {
                draft.years_since_oas = Some(rules::years_in_canada(value, key, answers)?)
            }
            FieldKey::EverLivedSocialCountry => {
                draft.ever_lived_social_country =
                    Some(rules::ever_lived_social_country(value, answers)?)
            }
            FieldKey::MaritalStatus => {
                draft.marital_status = Some(rules::marital_status(value)?)
            }
            FieldKey::InvSeparated => draft.inv_separated = Some(rules::boolean(value, key)?),
            FieldKey::PartnerIncome => draft.partner_income = Some(rules::income(value, key)?),
            FieldKey::PartnerIncomeWork => {
                draft.partner_income_work = Some(rules::work_income(value, key, answers)?)
            }
            FieldKey::PartnerBenefitStatus => {
                draft.partner_benefit_status = Some(rules::partner_benefit_status(value)?)
            }
            FieldKey::PartnerAge => draft.partner_age = Some(rules::age(value, key, self.year)?),
            FieldKey::PartnerLegalStatus => {
                draft.partner_legal_status = Some(rules::legal_status(value, key)?)
            }
            FieldKey::PartnerLivingCountry => {
                draft.partner_living_country = Some(rules::country(value, key)?)
            }
            FieldKey::PartnerLivedOutsideCanada => {
                draft.partner_lived_outside_canada = Some(rules::boolean(value, key)?)
            }
            FieldKey::PartnerYearsInCanadaSince18 => {
                draft.partner_years_since_18 = Some(rules::years_in_canada(value, key, answers)?)
            }
            FieldKey::PartnerEverLivedSocialCountry => {
                draft.partner_ever_lived_social_country = Some(rules::boolean(value, key)?)
            }
        }
        Ok(())
    }
}

/// Hidden catalog questions are skipped and their stale values dropped.
///
/// An answered `everLivedSocialCountry` is always checked: the years since
/// the OAS start can fall below the threshold while the question is hidden.
fn applies(
    key: FieldKey,
    answers: &RawAnswers,
    requirements: &FieldRequirements,
    partnered: bool,
) -> bool {
    match key {
        FieldKey::EverLivedSocialCountry => {
            answers.contains(key) || requirements.is_visible(key)
        }
        FieldKey::PartnerIncomeWork
        | FieldKey::PartnerAge
        | FieldKey::PartnerLegalStatus
        | FieldKey::PartnerLivingCountry
        | FieldKey::PartnerLivedOutsideCanada => partnered,
        key if key.is_supplementary() => true,
        key => requirements.is_visible(key),
    }
}

#[derive(Default)]
struct Draft {
    age: Option<f64>,
    oas_defer: Option<bool>,
    oas_age: Option<f64>,
    income: Option<f64>,
    income_work: Option<f64>,
    legal_status: Option<LegalStatus>,
    living_country: Option<String>,
    lived_outside_canada: Option<bool>,
    years_since_18: Option<u32>,
    years_since_oas: Option<u32>,
    ever_lived_social_country: Option<bool>,
    marital_status: Option<MaritalStatus>,
    inv_separated: Option<bool>,
    partner_income: Option<f64>,
    partner_income_work: Option<f64>,
    partner_benefit_status: Option<PartnerBenefitStatus>,
    partner_age: Option<f64>,
    partner_legal_status: Option<LegalStatus>,
    partner_living_country: Option<String>,
    partner_lived_outside_canada: Option<bool>,
    partner_years_since_18: Option<u32>,
    partner_ever_lived_social_country: Option<bool>,
}

impl Draft {
    fn finish(self, partnered: bool) -> Result<ValidatedAnswers, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let age = require(self.age, FieldKey::Age, &mut errors);
        let oas_defer = require(self.oas_defer, FieldKey::OasDefer, &mut errors);
        let income = require(self.income, FieldKey::Income, &mut errors);
        let legal_status = require(self.legal_status, FieldKey::LegalStatus, &mut errors);
        let living_country = require(self.living_country, FieldKey::LivingCountry, &mut errors);
        let lived_outside_canada = require(
            self.lived_outside_canada,
            FieldKey::LivedOutsideCanada,
            &mut errors,
        );
        let marital_status = require(self.marital_status, FieldKey::MaritalStatus, &mut errors);

        let partner = if partnered {
            let income = require(self.partner_income, FieldKey::PartnerIncome, &mut errors);
            let benefit_status = require(
                self.partner_benefit_status,
                FieldKey::PartnerBenefitStatus,
                &mut errors,
            );
            income.zip(benefit_status).map(|(income, benefit_status)| ValidatedPartner {
                income,
                income_work: self.partner_income_work,
                benefit_status,
                age: self.partner_age,
                legal_status: self.partner_legal_status,
                living_country: self.partner_living_country,
                lived_outside_canada: self.partner_lived_outside_canada,
                years_in_canada_since_18: self.partner_years_since_18,
                ever_lived_social_country: self.partner_ever_lived_social_country,
            })
        } else {
            None
        };

        match (
            age,
            oas_defer,
            income,
            legal_status,
            living_country,
            lived_outside_canada,
            marital_status,
        ) {
            (
                Some(age),
                Some(oas_defer),
                Some(income),
                Some(legal_status),
                Some(living_country),
                Some(lived_outside_canada),
                Some(marital_status),
            ) if errors.is_empty() => Ok(ValidatedAnswers {
                age,
                oas_defer,
                oas_age: self.oas_age,
                income,
                income_work: self.income_work,
                legal_status,
                living_country,
                lived_outside_canada,
                years_in_canada_since_18: self.years_since_18,
                years_in_canada_since_oas: self.years_since_oas,
                ever_lived_social_country: self.ever_lived_social_country,
                marital_status,
                inv_separated: self.inv_separated.unwrap_or(false),
                partner,
            }),
            _ => Err(errors),
        }
    }
}

fn require<T>(value: Option<T>, key: FieldKey, errors: &mut ValidationErrors) -> Option<T> {
    if value.is_none() {
        errors.push(key, rules::empty_code(key));
    }
    value
}
