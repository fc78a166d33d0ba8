use super::super::countries;
use super::super::domain::{
    FieldKey, FieldValue, LegalStatus, MaritalStatus, PartnerBenefitStatus, RawAnswers,
};
use super::errors::ValidationErrorCode as Code;

const MIN_BIRTH_YEAR: f64 = 1899.0;
const ADULT_AGE: f64 = 18.0;
const OAS_MIN_START_AGE: f64 = 65.0;
const OAS_MAX_START_AGE: f64 = 70.0;

/// Code reported when a field is absent or holds the wrong primitive.
pub(crate) const fn empty_code(key: FieldKey) -> Code {
    match key {
        FieldKey::Age | FieldKey::PartnerAge => Code::InvalidAge,
        FieldKey::OasDefer => Code::OasDeferEmpty,
        FieldKey::OasAge => Code::OasAge65to70,
        FieldKey::Income => Code::IncomeEmpty,
        FieldKey::IncomeWork => Code::IncomeWorkEmpty,
        FieldKey::LegalStatus => Code::LegalStatusNotSelected,
        FieldKey::LivingCountry | FieldKey::PartnerLivingCountry => {
            Code::LivingCountryNotSelected
        }
        FieldKey::LivedOutsideCanada => Code::OnlyInCanadaEmpty,
        FieldKey::YearsInCanadaSince18 | FieldKey::YearsInCanadaSinceOas => {
            Code::YearsInCanadaMinusAge
        }
        FieldKey::EverLivedSocialCountry => Code::SocialCountryEmpty,
        FieldKey::MaritalStatus => Code::MaritalStatusEmpty,
        FieldKey::InvSeparated => Code::InvSeparatedEmpty,
        FieldKey::PartnerIncome => Code::PartnerIncomeEmpty,
        FieldKey::PartnerIncomeWork => Code::PartnerIncomeWorkEmpty,
        FieldKey::PartnerBenefitStatus => Code::PartnerBenefitStatusEmpty,
        FieldKey::PartnerLegalStatus => Code::PartnerLegalStatusNotSelected,
        FieldKey::PartnerLivedOutsideCanada => Code::PartnerOnlyInCanadaEmpty,
        FieldKey::PartnerYearsInCanadaSince18 => Code::PartnerYearsSince18Empty,
        FieldKey::PartnerEverLivedSocialCountry => Code::PartnerSocialCountryEmpty,
    }
}

fn number(value: &FieldValue, key: FieldKey) -> Result<f64, Code> {
    value
        .as_number()
        .filter(|number| number.is_finite())
        .ok_or(empty_code(key))
}

pub(crate) fn boolean(value: &FieldValue, key: FieldKey) -> Result<bool, Code> {
    value.as_bool().ok_or(empty_code(key))
}

/// Birth year must fall in `[1899, year]`; adulthood is checked only after that.
pub(crate) fn age(value: &FieldValue, key: FieldKey, year: i32) -> Result<f64, Code> {
    let age = number(value, key)?;
    let year = f64::from(year);
    let birth_year = year - age;

    if !(MIN_BIRTH_YEAR..=year).contains(&birth_year) {
        return Err(Code::InvalidAge);
    }
    if age < ADULT_AGE {
        return Err(match key {
            FieldKey::PartnerAge => Code::PartnerAgeUnder18,
            _ => Code::AgeUnder18,
        });
    }
    Ok(age)
}

pub(crate) fn oas_age(value: &FieldValue) -> Result<f64, Code> {
    let age = number(value, FieldKey::OasAge)?;
    if (OAS_MIN_START_AGE..=OAS_MAX_START_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(Code::OasAge65to70)
    }
}

pub(crate) fn income(value: &FieldValue, key: FieldKey) -> Result<f64, Code> {
    let amount = number(value, key)?;
    if amount < 0.0 {
        return Err(below_zero(key));
    }
    Ok(amount)
}

/// Work income is bounded by the net income declared in the same submission.
pub(crate) fn work_income(
    value: &FieldValue,
    key: FieldKey,
    answers: &RawAnswers,
) -> Result<f64, Code> {
    let amount = income(value, key)?;
    let (net_key, too_high) = match key {
        FieldKey::PartnerIncomeWork => (
            FieldKey::PartnerIncome,
            Code::PartnerIncomeWorkGreaterThanNetIncome,
        ),
        _ => (FieldKey::Income, Code::IncomeWorkGreaterThanNetIncome),
    };

    match answers.number(net_key) {
        Some(net) if amount > net => Err(too_high),
        _ => Ok(amount),
    }
}

fn below_zero(key: FieldKey) -> Code {
    match key {
        FieldKey::PartnerIncome | FieldKey::PartnerIncomeWork => Code::PartnerIncomeBelowZero,
        _ => Code::IncomeBelowZero,
    }
}

pub(crate) fn legal_status(value: &FieldValue, key: FieldKey) -> Result<LegalStatus, Code> {
    let raw = value.as_text().ok_or(empty_code(key))?;
    let status = raw.parse::<LegalStatus>().map_err(|_| empty_code(key))?;

    // only the applicant's own status gates the estimate
    if key == FieldKey::LegalStatus && status == LegalStatus::No {
        return Err(Code::LegalUnavailable);
    }
    Ok(status)
}

pub(crate) fn marital_status(value: &FieldValue) -> Result<MaritalStatus, Code> {
    let raw = value
        .as_text()
        .ok_or(empty_code(FieldKey::MaritalStatus))?;
    raw.parse().map_err(|_| Code::MaritalUnavailable)
}

pub(crate) fn partner_benefit_status(value: &FieldValue) -> Result<PartnerBenefitStatus, Code> {
    let raw = value
        .as_text()
        .ok_or(empty_code(FieldKey::PartnerBenefitStatus))?;
    raw.parse()
        .map_err(|_| empty_code(FieldKey::PartnerBenefitStatus))
}

pub(crate) fn country(value: &FieldValue, key: FieldKey) -> Result<String, Code> {
    match value.as_text() {
        Some(code) if countries::is_recognized(code) => Ok(code.to_string()),
        _ => Err(empty_code(key)),
    }
}

/// Whole years since 18, capped by the matching age answer.
pub(crate) fn years_in_canada(
    value: &FieldValue,
    key: FieldKey,
    answers: &RawAnswers,
) -> Result<u32, Code> {
    let (age_key, exceeded) = match key {
        FieldKey::PartnerYearsInCanadaSince18 => {
            (FieldKey::PartnerAge, Code::PartnerYearsInCanadaMinusAge)
        }
        _ => (FieldKey::Age, Code::YearsInCanadaMinusAge),
    };

    let years = number(value, key).map_err(|_| exceeded)?;
    if years < 0.0 || years.fract() != 0.0 || years > f64::from(u32::MAX) {
        return Err(exceeded);
    }
    if let Some(age) = answers.number(age_key) {
        if years > age - ADULT_AGE {
            return Err(exceeded);
        }
    }
    Ok(years as u32)
}

/// Applicants under the residency threshold cannot be estimated, whatever they answer.
///
/// The threshold is checked against years since 18 and, independently, years
/// since the OAS start; the reported code depends on the answer itself.
pub(crate) fn ever_lived_social_country(
    value: &FieldValue,
    answers: &RawAnswers,
) -> Result<bool, Code> {
    let lived_in_agreement_country = boolean(value, FieldKey::EverLivedSocialCountry)?;
    let threshold = countries::residency_threshold(answers.text(FieldKey::LivingCountry));

    let below_threshold = [
        FieldKey::YearsInCanadaSince18,
        FieldKey::YearsInCanadaSinceOas,
    ]
    .into_iter()
    .filter_map(|key| answers.number(key))
    .any(|years| years < f64::from(threshold));

    if !below_threshold {
        return Ok(lived_in_agreement_country);
    }

    Err(match (lived_in_agreement_country, threshold) {
        (true, 10) => Code::SocialCountryUnavailable10,
        (true, _) => Code::SocialCountryUnavailable20,
        (false, 10) => Code::YearsInCanadaNotEnough10,
        (false, _) => Code::YearsInCanadaNotEnough20,
    })
}
