use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{FieldKey, RawAnswers};
use super::fields::{field_catalog, FieldConfig};

/// Coarse outcome shown at the top of the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryState {
    AvailableEligible,
    MoreInfo,
    Unavailable,
    AvailableIneligible,
    AvailableDepending,
}

impl SummaryState {
    pub const fn as_str(self) -> &'static str {
        match self {
            SummaryState::AvailableEligible => "AVAILABLE_ELIGIBLE",
            SummaryState::MoreInfo => "MORE_INFO",
            SummaryState::Unavailable => "UNAVAILABLE",
            SummaryState::AvailableIneligible => "AVAILABLE_INELIGIBLE",
            SummaryState::AvailableDepending => "AVAILABLE_DEPENDING",
        }
    }
}

/// Visible and missing questions for one answer set, both in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRequirements {
    pub visible: Vec<FieldKey>,
    pub missing: Vec<FieldKey>,
}

impl FieldRequirements {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_visible(&self, key: FieldKey) -> bool {
        self.visible.contains(&key)
    }

    /// `MoreInfo` while anything is missing; the final state needs evaluation.
    pub fn state(&self) -> Option<SummaryState> {
        if self.is_complete() {
            None
        } else {
            Some(SummaryState::MoreInfo)
        }
    }
}

/// Resolves which catalog questions apply to an answer set.
#[derive(Debug, Clone, Copy)]
pub struct RequirementResolver {
    catalog: &'static [FieldConfig],
}

impl Default for RequirementResolver {
    fn default() -> Self {
        Self::new(field_catalog())
    }
}

impl RequirementResolver {
    pub fn new(catalog: &'static [FieldConfig]) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'static [FieldConfig] {
        self.catalog
    }

    pub fn resolve(&self, answers: &RawAnswers) -> FieldRequirements {
        let mut requirements = FieldRequirements::default();

        for config in self.catalog {
            if !config.is_visible(answers) {
                continue;
            }
            requirements.visible.push(config.key);
            if !answers.contains(config.key) {
                requirements.missing.push(config.key);
            }
        }

        debug!(
            visible = requirements.visible.len(),
            missing = requirements.missing.len(),
            "resolved field requirements"
        );
        requirements
    }
}

pub fn resolve(answers: &RawAnswers) -> FieldRequirements {
    RequirementResolver::default().resolve(answers)
}
