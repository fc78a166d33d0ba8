use serde::Serialize;

use super::evaluator::{
    BenefitKey, BenefitOutcome, EligibilityResult, EntitlementResult, EntitlementResultType,
    ResultKey, ResultReason,
};
use super::normalizer::ProcessedInput;
use super::translations::TranslationCatalog;

const OAS_AGE: f64 = 65.0;
const OAS_MAX_DEFERRAL_AGE: f64 = 70.0;
const DEFERRAL_MONTHLY_INCREASE: f64 = 0.006;
const DEFERRAL_MAX_MONTHS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkIcon {
    Note,
    Info,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
    pub order: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<LinkIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Link {
    /// Reads `<key>.text` and `<key>.url` from the table.
    pub fn from_catalog(catalog: &TranslationCatalog, key: &str, order: u16) -> Self {
        Self {
            text: catalog.text(&format!("{key}.text")).to_string(),
            url: catalog.text(&format!("{key}.url")).to_string(),
            order,
            icon: None,
            action: None,
        }
    }

    pub fn with_icon(mut self, icon: LinkIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardCollapsedText {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub age: u32,
    pub amount: f64,
}

/// Deferral table for the future OAS card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMeta {
    pub table_data: Option<Vec<TableRow>>,
    pub current_age: Option<u32>,
    pub months_to70: Option<u32>,
    pub receive_oas: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    pub main_text: String,
    pub collapsed_text: Vec<CardCollapsedText>,
    pub links: Vec<Link>,
    pub meta: CardMeta,
}

/// One benefit's evaluation plus the text shown on its card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitResult {
    pub benefit_key: BenefitKey,
    pub eligibility: EligibilityResult,
    pub entitlement: EntitlementResult,
    pub card_detail: CardDetail,
}

/// Everything the card functions read.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub benefit: BenefitKey,
    pub outcome: &'a BenefitOutcome,
    pub input: &'a ProcessedInput,
    /// The card describes the partner rather than the applicant.
    pub partner: bool,
    /// The card describes a projected age.
    pub future: bool,
}

impl CardContext<'_> {
    fn result(&self) -> ResultKey {
        self.outcome.eligibility.result
    }

    fn reason(&self) -> ResultReason {
        self.outcome.eligibility.reason
    }

    fn amount(&self) -> f64 {
        self.outcome.entitlement.result
    }

    /// Eligible by the rules but the income ceiling leaves nothing to pay.
    fn income_too_high(&self) -> bool {
        self.result() == ResultKey::Eligible
            && (self.outcome.entitlement.kind == EntitlementResultType::None
                || self.reason() == ResultReason::Income)
    }
}

pub fn benefit_result(context: CardContext<'_>, catalog: &TranslationCatalog) -> BenefitResult {
    BenefitResult {
        benefit_key: context.benefit,
        eligibility: context.outcome.eligibility.clone(),
        entitlement: context.outcome.entitlement.clone(),
        card_detail: card_detail(context, catalog),
    }
}

pub fn card_detail(context: CardContext<'_>, catalog: &TranslationCatalog) -> CardDetail {
    CardDetail {
        main_text: card_text(context, catalog),
        collapsed_text: collapsed_text(context, catalog),
        links: card_links(context, catalog),
        meta: card_meta(context),
    }
}

pub fn card_text(context: CardContext<'_>, catalog: &TranslationCatalog) -> String {
    if context.income_too_high() {
        let key = match (context.benefit, context.future) {
            (_, true) => "detail.futureEligibleIncomeTooHigh",
            (BenefitKey::Gis, false) => "detail.gis.incomeTooHigh",
            (_, false) => "detail.eligibleIncomeTooHigh",
        };
        return catalog.text(key).to_string();
    }

    let mut text = catalog.text(&context.outcome.eligibility.detail).to_string();
    if context.result() == ResultKey::Eligible && context.amount() > 0.0 {
        let key = if context.future {
            "detail.futureExpectToReceive"
        } else {
            "detail.expectToReceive"
        };
        text.push(' ');
        text.push_str(catalog.text(key));
    }

    if context.benefit == BenefitKey::Oas {
        append_oas_text(&mut text, context, catalog);
    }
    text
}

fn append_oas_text(text: &mut String, context: CardContext<'_>, catalog: &TranslationCatalog) {
    if context.result() == ResultKey::IncomeDependent {
        text.push(' ');
        text.push_str(catalog.text("detail.oas.dependOnYourIncome"));
    }
    if context.result() == ResultKey::Ineligible && context.reason() == ResultReason::AgeYoung64 {
        text.push(' ');
        text.push_str(catalog.text("detail.oas.youShouldHaveReceivedLetter"));
    }
    if context.outcome.entitlement.clawback > 0.0 {
        let key = match (context.partner, context.input.living_country.canada, context.future) {
            (false, true, true) => "detail.futureOasClawbackInCanada",
            (false, true, false) => "detail.oasClawbackInCanada",
            _ => "detail.oasClawbackNotInCanada",
        };
        text.push(' ');
        text.push_str(catalog.text(key));
    }
}

pub fn collapsed_text(
    context: CardContext<'_>,
    catalog: &TranslationCatalog,
) -> Vec<CardCollapsedText> {
    if !context.result().is_positive() {
        return Vec::new();
    }

    let partner_benefit = context.input.partner_benefit_status;
    let keys: Vec<&str> = match context.benefit {
        BenefitKey::Oas if context.partner && context.amount() != 0.0 => {
            if partner_benefit.gis || partner_benefit.help_me {
                vec!["partnerEligible"]
            } else {
                vec!["partnerEligibleButAnsweredNo"]
            }
        }
        BenefitKey::Oas if context.reason() != ResultReason::Income && !context.future => {
            vec!["oasIncreaseAt75"]
        }
        BenefitKey::Gis if context.partner => {
            if context.input.income.provided && context.amount() != 0.0 {
                if partner_benefit.none {
                    vec!["partnerEligibleButAnsweredNo"]
                } else {
                    vec!["partnerEligible"]
                }
            } else {
                Vec::new()
            }
        }
        BenefitKey::Gis => {
            let age = context.input.age;
            let deferrable = (OAS_AGE..OAS_MAX_DEFERRAL_AGE).contains(&age);
            if deferrable && context.amount() != 0.0 && !context.future {
                vec!["ifYouDeferYourPension"]
            } else {
                Vec::new()
            }
        }
        BenefitKey::Alw if context.partner && context.amount() > 0.0 => {
            if context.result() == ResultKey::IncomeDependent {
                vec!["partnerDependOnYourIncome"]
            } else if !context.input.inv_separated {
                vec!["partnerEligible"]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    };

    keys.into_iter()
        .map(|name| CardCollapsedText {
            heading: catalog
                .text(&format!("detailWithHeading.{name}.heading"))
                .to_string(),
            text: catalog.text(&format!("detailWithHeading.{name}.text")).to_string(),
        })
        .collect()
}

/// Apply link when the applicant can act on the result, then the overview link.
pub fn card_links(context: CardContext<'_>, catalog: &TranslationCatalog) -> Vec<Link> {
    let positive = context.result().is_positive();
    let too_young = context.result() == ResultKey::Ineligible
        && context.reason() == ResultReason::AgeYoung;

    let apply = match context.benefit {
        BenefitKey::Oas => positive || context.reason() == ResultReason::AgeYoung64,
        BenefitKey::Gis => positive && !context.future,
        BenefitKey::Alw | BenefitKey::Alws => positive || too_young,
    };

    let benefit = context.benefit.as_str();
    let mut links = Vec::with_capacity(2);
    if apply {
        links.push(
            Link::from_catalog(catalog, &format!("links.apply.{benefit}"), 1)
                .with_icon(LinkIcon::Note)
                .with_action("apply"),
        );
    }
    links.push(
        Link::from_catalog(catalog, &format!("links.overview.{benefit}"), 2)
            .with_icon(LinkIcon::Info)
            .with_action("overview"),
    );
    links
}

/// Only the future OAS card carries a deferral table.
pub fn card_meta(context: CardContext<'_>) -> CardMeta {
    if context.benefit != BenefitKey::Oas || !context.future {
        return CardMeta::default();
    }

    let age = context.input.age;
    let deferrable = (OAS_AGE..OAS_MAX_DEFERRAL_AGE).contains(&age);
    if !context.result().is_positive() || !deferrable {
        return CardMeta::default();
    }

    let months_to_70 = ((OAS_MAX_DEFERRAL_AGE - age) * 12.0).round();
    let mut meta = CardMeta {
        months_to70: Some(months_to_70 as u32),
        ..CardMeta::default()
    };

    let estimate = context.amount();
    if estimate > 0.0 {
        let first = age.floor() as u32 + 1;
        let rows = (first..=OAS_MAX_DEFERRAL_AGE as u32)
            .map(|defer_age| {
                let months = ((f64::from(defer_age) - age) * 12.0)
                    .round()
                    .clamp(0.0, DEFERRAL_MAX_MONTHS);
                let amount = estimate * (1.0 + DEFERRAL_MONTHLY_INCREASE * months);
                TableRow {
                    age: defer_age,
                    amount: (amount * 100.0).round() / 100.0,
                }
            })
            .collect();
        meta.table_data = Some(rows);
        meta.current_age = Some(age.floor() as u32);
    }
    meta
}
