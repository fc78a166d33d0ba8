use std::collections::BTreeMap;

use serde::Serialize;

use super::cards::{BenefitResult, Link, LinkIcon};
use super::evaluator::{BenefitKey, ResultKey};
use super::requirements::SummaryState;
use super::translations::TranslationCatalog;

pub type BenefitResults = BTreeMap<BenefitKey, BenefitResult>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub state: SummaryState,
    pub partner_state: SummaryState,
    pub title: String,
    pub links: Vec<Link>,
    pub details: String,
    pub entitlement_sum: f64,
    pub partner_entitlement_sum: f64,
}

impl Summary {
    /// Summary for an answer set that still has unanswered questions.
    pub fn more_info(catalog: &TranslationCatalog) -> Self {
        Self::from_state(
            SummaryState::MoreInfo,
            SummaryState::MoreInfo,
            0.0,
            0.0,
            catalog,
        )
    }

    pub fn from_results(
        results: &BenefitResults,
        partner_results: &BenefitResults,
        catalog: &TranslationCatalog,
    ) -> Self {
        Self::from_state(
            summary_state(results),
            summary_state(partner_results),
            entitlement_sum(results),
            entitlement_sum(partner_results),
            catalog,
        )
    }

    fn from_state(
        state: SummaryState,
        partner_state: SummaryState,
        entitlement_sum: f64,
        partner_entitlement_sum: f64,
        catalog: &TranslationCatalog,
    ) -> Self {
        let name = state.as_str();
        Self {
            state,
            partner_state,
            title: catalog.text(&format!("summary.title.{name}")).to_string(),
            details: catalog.text(&format!("summary.details.{name}")).to_string(),
            links: summary_links(state, catalog),
            entitlement_sum,
            partner_entitlement_sum,
        }
    }
}

/// Unavailable wins over eligible, eligible over income-dependent.
///
/// An empty result set means nothing could be evaluated.
pub fn summary_state(results: &BenefitResults) -> SummaryState {
    if results.is_empty() {
        return SummaryState::Unavailable;
    }

    let has = |key: ResultKey| results.values().any(|result| result.eligibility.result == key);
    if has(ResultKey::Unavailable) {
        SummaryState::Unavailable
    } else if has(ResultKey::Eligible) {
        SummaryState::AvailableEligible
    } else if has(ResultKey::IncomeDependent) {
        SummaryState::AvailableDepending
    } else {
        SummaryState::AvailableIneligible
    }
}

/// Monthly total across eligible benefits, rounded to cents.
pub fn entitlement_sum(results: &BenefitResults) -> f64 {
    let sum: f64 = results
        .values()
        .filter(|result| result.eligibility.result == ResultKey::Eligible)
        .map(|result| result.entitlement.result)
        .sum();
    (sum * 100.0).round() / 100.0
}

fn summary_links(state: SummaryState, catalog: &TranslationCatalog) -> Vec<Link> {
    let mut links = Vec::new();
    if matches!(state, SummaryState::Unavailable | SummaryState::MoreInfo) {
        links.push(Link::from_catalog(catalog, "links.contactSC", 1).with_icon(LinkIcon::Info));
    }
    links.push(Link::from_catalog(catalog, "links.oasOverview", 2).with_icon(LinkIcon::Link));
    links
}
