use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalizer::ProcessedInput;

/// Benefits the estimator reports on, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitKey {
    Oas,
    Gis,
    Alw,
    Alws,
}

impl BenefitKey {
    pub const ALL: [BenefitKey; 4] = [
        BenefitKey::Oas,
        BenefitKey::Gis,
        BenefitKey::Alw,
        BenefitKey::Alws,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BenefitKey::Oas => "oas",
            BenefitKey::Gis => "gis",
            BenefitKey::Alw => "alw",
            BenefitKey::Alws => "alws",
        }
    }
}

impl fmt::Display for BenefitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKey {
    Eligible,
    Ineligible,
    IncomeDependent,
    Unavailable,
}

impl ResultKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResultKey::Eligible => "eligible",
            ResultKey::Ineligible => "ineligible",
            ResultKey::IncomeDependent => "incomeDependent",
            ResultKey::Unavailable => "unavailable",
        }
    }

    /// Eligible outright or pending the income test.
    pub const fn is_positive(self) -> bool {
        matches!(self, ResultKey::Eligible | ResultKey::IncomeDependent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultReason {
    None,
    Age,
    AgeYoung,
    AgeYoung64,
    YearsInCanada,
    Income,
    LegalStatus,
    LivingCountry,
    MaritalStatus,
    Partner,
    Oas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntitlementResultType {
    None,
    Full,
    Partial,
    Unavailable,
}

/// `detail` is a translation key resolved when the card is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub result: ResultKey,
    pub reason: ResultReason,
    pub detail: String,
}

impl EligibilityResult {
    pub fn new(result: ResultKey, reason: ResultReason, detail: impl Into<String>) -> Self {
        Self {
            result,
            reason,
            detail: detail.into(),
        }
    }
}

/// Monthly amount in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResult {
    pub result: f64,
    #[serde(rename = "type")]
    pub kind: EntitlementResultType,
    pub auto_enrollment: bool,
    #[serde(default)]
    pub clawback: f64,
}

impl EntitlementResult {
    pub fn none() -> Self {
        Self {
            result: 0.0,
            kind: EntitlementResultType::None,
            auto_enrollment: false,
            clawback: 0.0,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            kind: EntitlementResultType::Unavailable,
            ..Self::none()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitOutcome {
    pub eligibility: EligibilityResult,
    pub entitlement: EntitlementResult,
}

/// Outcomes keyed by benefit; benefits the evaluator skipped are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefitOutcomes(BTreeMap<BenefitKey, BenefitOutcome>);

impl BenefitOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: BenefitKey, outcome: BenefitOutcome) {
        self.0.insert(key, outcome);
    }

    pub fn get(&self, key: BenefitKey) -> Option<&BenefitOutcome> {
        self.0.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BenefitKey, &BenefitOutcome)> {
        self.0.iter().map(|(key, outcome)| (*key, outcome))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Eligibility and entitlement collaborator invoked with normalized input.
pub trait BenefitEvaluator: Send + Sync {
    fn evaluate(&self, input: &ProcessedInput) -> Result<BenefitOutcomes, EvaluatorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    /// The evaluator refused the input.
    #[error("evaluator rejected input: {0}")]
    Rejected(String),
    #[error("evaluator failed: {0}")]
    Failed(String),
}
