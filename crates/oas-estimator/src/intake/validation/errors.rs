use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::FieldKey;

/// Business-rule violations. Each code doubles as a translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationErrorCode {
    InvalidAge,
    AgeUnder18,
    PartnerAgeUnder18,
    OasDeferEmpty,
    OasAge65to70,
    IncomeEmpty,
    IncomeWorkEmpty,
    IncomeBelowZero,
    IncomeWorkGreaterThanNetIncome,
    PartnerIncomeEmpty,
    PartnerIncomeWorkEmpty,
    PartnerIncomeBelowZero,
    PartnerIncomeWorkGreaterThanNetIncome,
    LegalStatusNotSelected,
    PartnerLegalStatusNotSelected,
    LegalUnavailable,
    LivingCountryNotSelected,
    OnlyInCanadaEmpty,
    PartnerOnlyInCanadaEmpty,
    YearsInCanadaMinusAge,
    PartnerYearsSince18Empty,
    PartnerYearsInCanadaMinusAge,
    SocialCountryEmpty,
    PartnerSocialCountryEmpty,
    YearsInCanadaNotEnough10,
    YearsInCanadaNotEnough20,
    SocialCountryUnavailable10,
    SocialCountryUnavailable20,
    MaritalStatusEmpty,
    MaritalUnavailable,
    InvSeparatedEmpty,
    PartnerBenefitStatusEmpty,
}

impl ValidationErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValidationErrorCode::InvalidAge => "invalidAge",
            ValidationErrorCode::AgeUnder18 => "ageUnder18",
            ValidationErrorCode::PartnerAgeUnder18 => "partnerAgeUnder18",
            ValidationErrorCode::OasDeferEmpty => "oasDeferEmpty",
            ValidationErrorCode::OasAge65to70 => "oasAge65to70",
            ValidationErrorCode::IncomeEmpty => "incomeEmpty",
            ValidationErrorCode::IncomeWorkEmpty => "incomeWorkEmpty",
            ValidationErrorCode::IncomeBelowZero => "incomeBelowZero",
            ValidationErrorCode::IncomeWorkGreaterThanNetIncome => {
                "incomeWorkGreaterThanNetIncome"
            }
            ValidationErrorCode::PartnerIncomeEmpty => "partnerIncomeEmpty",
            ValidationErrorCode::PartnerIncomeWorkEmpty => "partnerIncomeWorkEmpty",
            ValidationErrorCode::PartnerIncomeBelowZero => "partnerIncomeBelowZero",
            ValidationErrorCode::PartnerIncomeWorkGreaterThanNetIncome => {
                "partnerIncomeWorkGreaterThanNetIncome"
            }
            ValidationErrorCode::LegalStatusNotSelected => "legalStatusNotSelected",
            ValidationErrorCode::PartnerLegalStatusNotSelected => "partnerLegalStatusNotSelected",
            ValidationErrorCode::LegalUnavailable => "legalUnavailable",
            ValidationErrorCode::LivingCountryNotSelected => "livingCountryNotSelected",
            ValidationErrorCode::OnlyInCanadaEmpty => "onlyInCanadaEmpty",
            ValidationErrorCode::PartnerOnlyInCanadaEmpty => "partnerOnlyInCanadaEmpty",
            ValidationErrorCode::YearsInCanadaMinusAge => "yearsInCanadaMinusAge",
            ValidationErrorCode::PartnerYearsSince18Empty => "partnerYearsSince18Empty",
            ValidationErrorCode::PartnerYearsInCanadaMinusAge => "partnerYearsInCanadaMinusAge",
            ValidationErrorCode::SocialCountryEmpty => "socialCountryEmpty",
            ValidationErrorCode::PartnerSocialCountryEmpty => "partnerSocialCountryEmpty",
            ValidationErrorCode::YearsInCanadaNotEnough10 => "yearsInCanadaNotEnough10",
            ValidationErrorCode::YearsInCanadaNotEnough20 => "yearsInCanadaNotEnough20",
            ValidationErrorCode::SocialCountryUnavailable10 => "socialCountryUnavailable10",
            ValidationErrorCode::SocialCountryUnavailable20 => "socialCountryUnavailable20",
            ValidationErrorCode::MaritalStatusEmpty => "maritalStatusEmpty",
            ValidationErrorCode::MaritalUnavailable => "maritalUnavailable",
            ValidationErrorCode::InvSeparatedEmpty => "invSeparatedEmpty",
            ValidationErrorCode::PartnerBenefitStatusEmpty => "partnerBenefitStatusEmpty",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule violation attributed to the field that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FieldKey,
    pub code: ValidationErrorCode,
}

/// Every violation found in one pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("answers failed validation: {}", summarize(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, field: FieldKey, code: ValidationErrorCode) {
        let error = FieldError { field, code };
        if !self.0.contains(&error) {
            self.0.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn codes(&self) -> Vec<ValidationErrorCode> {
        self.0.iter().map(|error| error.code).collect()
    }

    pub fn for_field(&self, field: FieldKey) -> Vec<ValidationErrorCode> {
        self.0
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.code)
            .collect()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}={}", error.field, error.code))
        .collect::<Vec<_>>()
        .join(", ")
}
