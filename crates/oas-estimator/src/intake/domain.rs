use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for every answer key the estimator accepts.
///
/// Declaration order is the order validation errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Age,
    OasDefer,
    OasAge,
    Income,
    IncomeWork,
    LegalStatus,
    LivingCountry,
    LivedOutsideCanada,
    YearsInCanadaSince18,
    #[serde(rename = "yearsInCanadaSinceOAS")]
    YearsInCanadaSinceOas,
    EverLivedSocialCountry,
    MaritalStatus,
    InvSeparated,
    PartnerIncome,
    PartnerIncomeWork,
    PartnerBenefitStatus,
    PartnerAge,
    PartnerLegalStatus,
    PartnerLivingCountry,
    PartnerLivedOutsideCanada,
    PartnerYearsInCanadaSince18,
    PartnerEverLivedSocialCountry,
}

impl FieldKey {
    pub const ALL: [FieldKey; 22] = [
        FieldKey::Age,
        FieldKey::OasDefer,
        FieldKey::OasAge,
        FieldKey::Income,
        FieldKey::IncomeWork,
        FieldKey::LegalStatus,
        FieldKey::LivingCountry,
        FieldKey::LivedOutsideCanada,
        FieldKey::YearsInCanadaSince18,
        FieldKey::YearsInCanadaSinceOas,
        FieldKey::EverLivedSocialCountry,
        FieldKey::MaritalStatus,
        FieldKey::InvSeparated,
        FieldKey::PartnerIncome,
        FieldKey::PartnerIncomeWork,
        FieldKey::PartnerBenefitStatus,
        FieldKey::PartnerAge,
        FieldKey::PartnerLegalStatus,
        FieldKey::PartnerLivingCountry,
        FieldKey::PartnerLivedOutsideCanada,
        FieldKey::PartnerYearsInCanadaSince18,
        FieldKey::PartnerEverLivedSocialCountry,
    ];

    /// External name used in query strings and JSON bodies.
    pub const fn name(self) -> &'static str {
        match self {
            FieldKey::Age => "age",
            FieldKey::OasDefer => "oasDefer",
            FieldKey::OasAge => "oasAge",
            FieldKey::Income => "income",
            FieldKey::IncomeWork => "incomeWork",
            FieldKey::LegalStatus => "legalStatus",
            FieldKey::LivingCountry => "livingCountry",
            FieldKey::LivedOutsideCanada => "livedOutsideCanada",
            FieldKey::YearsInCanadaSince18 => "yearsInCanadaSince18",
            FieldKey::YearsInCanadaSinceOas => "yearsInCanadaSinceOAS",
            FieldKey::EverLivedSocialCountry => "everLivedSocialCountry",
            FieldKey::MaritalStatus => "maritalStatus",
            FieldKey::InvSeparated => "invSeparated",
            FieldKey::PartnerIncome => "partnerIncome",
            FieldKey::PartnerIncomeWork => "partnerIncomeWork",
            FieldKey::PartnerBenefitStatus => "partnerBenefitStatus",
            FieldKey::PartnerAge => "partnerAge",
            FieldKey::PartnerLegalStatus => "partnerLegalStatus",
            FieldKey::PartnerLivingCountry => "partnerLivingCountry",
            FieldKey::PartnerLivedOutsideCanada => "partnerLivedOutsideCanada",
            FieldKey::PartnerYearsInCanadaSince18 => "partnerYearsInCanadaSince18",
            FieldKey::PartnerEverLivedSocialCountry => "partnerEverLivedSocialCountry",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            FieldKey::Age
            | FieldKey::OasAge
            | FieldKey::Income
            | FieldKey::IncomeWork
            | FieldKey::PartnerIncome
            | FieldKey::PartnerIncomeWork
            | FieldKey::PartnerAge => FieldKind::Number,
            FieldKey::YearsInCanadaSince18
            | FieldKey::YearsInCanadaSinceOas
            | FieldKey::PartnerYearsInCanadaSince18 => FieldKind::Integer,
            FieldKey::OasDefer
            | FieldKey::LivedOutsideCanada
            | FieldKey::EverLivedSocialCountry
            | FieldKey::InvSeparated
            | FieldKey::PartnerLivedOutsideCanada
            | FieldKey::PartnerEverLivedSocialCountry => FieldKind::Boolean,
            FieldKey::LegalStatus
            | FieldKey::LivingCountry
            | FieldKey::MaritalStatus
            | FieldKey::PartnerBenefitStatus
            | FieldKey::PartnerLegalStatus
            | FieldKey::PartnerLivingCountry => FieldKind::Text,
        }
    }

    /// Supplementary answers are accepted and validated but never asked for.
    pub const fn is_supplementary(self) -> bool {
        matches!(
            self,
            FieldKey::IncomeWork
                | FieldKey::YearsInCanadaSinceOas
                | FieldKey::InvSeparated
                | FieldKey::PartnerIncomeWork
                | FieldKey::PartnerAge
                | FieldKey::PartnerLegalStatus
                | FieldKey::PartnerLivingCountry
                | FieldKey::PartnerLivedOutsideCanada
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primitive shape expected for a field; drives request coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Integer,
    Boolean,
    Text,
}

impl FieldKind {
    pub const fn label(self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Text => "string",
        }
    }
}

/// A single answered primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Boolean(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// One request's worth of answers, possibly partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAnswers {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: FieldKey, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: FieldKey, value: impl Into<FieldValue>) {
        self.values.insert(key, value.into());
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<FieldValue> {
        self.values.remove(&key)
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn number(&self, key: FieldKey) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    pub fn boolean(&self, key: FieldKey) -> Option<bool> {
        self.get(key).and_then(FieldValue::as_bool)
    }

    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn is_partnered(&self) -> bool {
        self.text(FieldKey::MaritalStatus)
            .and_then(|raw| raw.parse::<MaritalStatus>().ok())
            .map(MaritalStatus::is_partnered)
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Raised when a text answer is not a member of its enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{0}'")]
pub struct UnrecognizedValue(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaritalStatus {
    Single,
    Partnered,
    Widowed,
}

impl MaritalStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Partnered => "partnered",
            MaritalStatus::Widowed => "widowed",
        }
    }

    pub const fn is_partnered(self) -> bool {
        matches!(self, MaritalStatus::Partnered)
    }
}

impl FromStr for MaritalStatus {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "single" => Ok(MaritalStatus::Single),
            "partnered" => Ok(MaritalStatus::Partnered),
            "widowed" => Ok(MaritalStatus::Widowed),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegalStatus {
    CanadianCitizen,
    PermanentResident,
    IndianStatus,
    Other,
    No,
}

impl LegalStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LegalStatus::CanadianCitizen => "canadianCitizen",
            LegalStatus::PermanentResident => "permanentResident",
            LegalStatus::IndianStatus => "indianStatus",
            LegalStatus::Other => "other",
            LegalStatus::No => "no",
        }
    }
}

impl FromStr for LegalStatus {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "canadianCitizen" => Ok(LegalStatus::CanadianCitizen),
            "permanentResident" => Ok(LegalStatus::PermanentResident),
            "indianStatus" => Ok(LegalStatus::IndianStatus),
            "other" => Ok(LegalStatus::Other),
            "no" => Ok(LegalStatus::No),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// What the applicant's partner currently receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartnerBenefitStatus {
    Oas,
    OasGis,
    Alw,
    None,
    HelpMe,
}

impl PartnerBenefitStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            PartnerBenefitStatus::Oas => "oas",
            PartnerBenefitStatus::OasGis => "oasGis",
            PartnerBenefitStatus::Alw => "alw",
            PartnerBenefitStatus::None => "none",
            PartnerBenefitStatus::HelpMe => "helpMe",
        }
    }
}

impl FromStr for PartnerBenefitStatus {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "oas" => Ok(PartnerBenefitStatus::Oas),
            "oasGis" => Ok(PartnerBenefitStatus::OasGis),
            "alw" => Ok(PartnerBenefitStatus::Alw),
            "none" => Ok(PartnerBenefitStatus::None),
            "helpMe" => Ok(PartnerBenefitStatus::HelpMe),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// Response language, selected by the `_language` request key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl FromStr for Language {
    type Err = UnrecognizedValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "en-ca" => Ok(Language::En),
            "fr" | "fr-ca" => Ok(Language::Fr),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}
