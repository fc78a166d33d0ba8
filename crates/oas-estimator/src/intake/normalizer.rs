use serde::Serialize;

use super::countries;
use super::domain::{LegalStatus, MaritalStatus, PartnerBenefitStatus};
use super::validation::{ValidatedAnswers, ValidatedPartner};

const WORK_EXEMPTION_FULL: f64 = 5_000.0;
const WORK_EXEMPTION_PARTIAL: f64 = 10_000.0;
const ADULT_AGE: f64 = 18.0;

/// Portion of employment income excluded from the income test.
pub fn work_exemption(work_income: f64) -> f64 {
    let work_income = work_income.max(0.0);
    let full = work_income.min(WORK_EXEMPTION_FULL);
    let partial = (work_income - WORK_EXEMPTION_FULL).clamp(0.0, WORK_EXEMPTION_PARTIAL);
    full + partial / 2.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSummary {
    pub client: f64,
    pub client_work: f64,
    pub partner: Option<f64>,
    pub partner_work: f64,
    pub provided: bool,
    pub adjusted_income: f64,
    pub adjusted_relevant: f64,
}

impl IncomeSummary {
    pub fn new(
        client: f64,
        client_work: Option<f64>,
        partner: Option<f64>,
        partner_work: Option<f64>,
        partnered: bool,
    ) -> Self {
        let client_work = client_work.unwrap_or(0.0);
        let partner_work = partner_work.unwrap_or(0.0);
        let adjusted_income = (client - work_exemption(client_work)).max(0.0);
        let adjusted_partner = partner
            .map(|income| (income - work_exemption(partner_work)).max(0.0))
            .unwrap_or(0.0);
        let adjusted_relevant = if partnered {
            adjusted_income + adjusted_partner
        } else {
            adjusted_income
        };

        Self {
            client,
            client_work,
            partner,
            partner_work,
            provided: !partnered || partner.is_some(),
            adjusted_income,
            adjusted_relevant,
        }
    }

    /// Income used for the household test: combined when partnered.
    pub fn relevant(&self) -> f64 {
        self.adjusted_relevant
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidenceCountry {
    pub code: String,
    pub canada: bool,
    pub agreement: bool,
    pub no_agreement: bool,
}

impl ResidenceCountry {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let canada = countries::is_canada(&code);
        let agreement = !canada && countries::has_agreement(&code);
        Self {
            canada,
            agreement,
            no_agreement: !canada && !agreement,
            code,
        }
    }

    pub fn residency_threshold(&self) -> u32 {
        countries::residency_threshold(Some(&self.code))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaritalStanding {
    pub value: MaritalStatus,
    pub partnered: bool,
    pub single: bool,
    pub widowed: bool,
}

impl From<MaritalStatus> for MaritalStanding {
    fn from(value: MaritalStatus) -> Self {
        Self {
            value,
            partnered: value.is_partnered(),
            single: matches!(value, MaritalStatus::Single),
            widowed: matches!(value, MaritalStatus::Widowed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalStanding {
    pub value: LegalStatus,
    pub canadian: bool,
    pub other: bool,
}

impl From<LegalStatus> for LegalStanding {
    fn from(value: LegalStatus) -> Self {
        let canadian = matches!(
            value,
            LegalStatus::CanadianCitizen | LegalStatus::PermanentResident | LegalStatus::IndianStatus
        );
        Self {
            value,
            canadian,
            other: !canadian,
        }
    }
}

/// What the other half of the household receives; all flags are false when unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerBenefitStanding {
    pub value: Option<PartnerBenefitStatus>,
    pub any_oas: bool,
    pub gis: bool,
    pub alw: bool,
    pub none: bool,
    pub help_me: bool,
}

impl From<PartnerBenefitStatus> for PartnerBenefitStanding {
    fn from(value: PartnerBenefitStatus) -> Self {
        Self {
            value: Some(value),
            any_oas: matches!(value, PartnerBenefitStatus::Oas | PartnerBenefitStatus::OasGis),
            gis: matches!(value, PartnerBenefitStatus::OasGis),
            alw: matches!(value, PartnerBenefitStatus::Alw),
            none: matches!(value, PartnerBenefitStatus::None),
            help_me: matches!(value, PartnerBenefitStatus::HelpMe),
        }
    }
}

/// Domain input handed to the benefit evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedInput {
    pub income: IncomeSummary,
    pub age: f64,
    pub oas_defer: bool,
    pub oas_age: Option<f64>,
    pub marital_status: MaritalStanding,
    pub living_country: ResidenceCountry,
    pub legal_status: LegalStanding,
    pub lived_only_in_canada: bool,
    pub years_in_canada_since_18: Option<u32>,
    pub years_in_canada_since_oas: Option<u32>,
    pub ever_lived_social_country: Option<bool>,
    pub partner_benefit_status: PartnerBenefitStanding,
    pub inv_separated: bool,
}

impl ProcessedInput {
    /// Adult years spent in Canada; everyone who never left counts every year since 18.
    pub fn residence_years(&self) -> f64 {
        if self.lived_only_in_canada {
            (self.age - ADULT_AGE).max(0.0).floor()
        } else {
            self.years_in_canada_since_18.map(f64::from).unwrap_or(0.0)
        }
    }

    /// Same household at a later age. Residents of Canada keep accruing years.
    pub fn projected_to(&self, age: f64) -> ProcessedInput {
        let mut projected = self.clone();
        if age <= self.age {
            return projected;
        }

        let delta = (age - self.age).floor();
        projected.age = age;
        if self.living_country.canada && !self.lived_only_in_canada {
            projected.years_in_canada_since_18 = self
                .years_in_canada_since_18
                .map(|years| years.saturating_add(delta as u32));
        }
        projected
    }

    pub fn with_partner_benefit(mut self, status: PartnerBenefitStanding) -> Self {
        self.partner_benefit_status = status;
        self
    }
}

/// Normalized applicant plus, when computable, the partner seen as an applicant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Household {
    pub client: ProcessedInput,
    pub partner: Option<ProcessedInput>,
}

pub fn normalize(answers: &ValidatedAnswers) -> ProcessedInput {
    let partner = answers.partner.as_ref();
    let marital_status = MaritalStanding::from(answers.marital_status);

    ProcessedInput {
        income: IncomeSummary::new(
            answers.income,
            answers.income_work,
            partner.map(|partner| partner.income),
            partner.and_then(|partner| partner.income_work),
            marital_status.partnered,
        ),
        age: answers.age,
        oas_defer: answers.oas_defer,
        oas_age: answers.oas_age,
        marital_status,
        living_country: ResidenceCountry::new(answers.living_country.as_str()),
        legal_status: LegalStanding::from(answers.legal_status),
        lived_only_in_canada: !answers.lived_outside_canada,
        years_in_canada_since_18: answers.years_in_canada_since_18,
        years_in_canada_since_oas: answers.years_in_canada_since_oas,
        ever_lived_social_country: answers.ever_lived_social_country,
        partner_benefit_status: partner
            .map(|partner| PartnerBenefitStanding::from(partner.benefit_status))
            .unwrap_or_default(),
        inv_separated: answers.inv_separated,
    }
}

pub fn normalize_household(answers: &ValidatedAnswers) -> Household {
    let client = normalize(answers);
    let partner = answers
        .partner
        .as_ref()
        .and_then(|partner| mirror_partner(answers, partner, &client));
    Household { client, partner }
}

/// The partner's demographics are optional, so the mirror needs all three.
fn mirror_partner(
    answers: &ValidatedAnswers,
    partner: &ValidatedPartner,
    client: &ProcessedInput,
) -> Option<ProcessedInput> {
    let age = partner.age?;
    let legal_status = partner.legal_status?;
    let living_country = partner.living_country.as_deref()?;

    Some(ProcessedInput {
        income: IncomeSummary::new(
            partner.income,
            partner.income_work,
            Some(answers.income),
            answers.income_work,
            true,
        ),
        age,
        oas_defer: false,
        oas_age: None,
        marital_status: client.marital_status,
        living_country: ResidenceCountry::new(living_country),
        legal_status: LegalStanding::from(legal_status),
        lived_only_in_canada: !partner.lived_outside_canada.unwrap_or(false),
        years_in_canada_since_18: partner.years_in_canada_since_18,
        years_in_canada_since_oas: None,
        ever_lived_social_country: partner.ever_lived_social_country,
        partner_benefit_status: PartnerBenefitStanding::default(),
        inv_separated: client.inv_separated,
    })
}
