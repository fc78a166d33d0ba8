use crate::infra::{estimation_service, read_answers};
use clap::Args;
use oas_estimator::config::AppConfig;
use oas_estimator::error::AppError;
use oas_estimator::intake::{
    field_catalog, resolve, BenefitResults, EstimationResponse, EstimationSuccess,
    FieldRequirements, Language, RawAnswers,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// JSON object of answers keyed by field name
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Response language (en or fr). Overrides `_language` in the answers file.
    #[arg(long, value_parser = crate::infra::parse_language)]
    pub(crate) language: Option<Language>,
    /// Print the full JSON response instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FieldsArgs {
    /// Mark which fields are visible and missing for these answers
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        answers,
        language,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = estimation_service(&config.estimator)?;
    let request = read_answers(&answers)?;
    let language = language.unwrap_or(request.language);

    let response = service.process(&request.answers, language)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for line in render_response(&response) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_fields(args: FieldsArgs) -> Result<(), AppError> {
    let answers = match args.answers {
        Some(path) => Some(read_answers(&path)?.answers),
        None => None,
    };

    for line in render_fields(answers.as_ref()) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_response(response: &EstimationResponse) -> Vec<String> {
    match response {
        EstimationResponse::Success(success) => render_success(success),
        EstimationResponse::Invalid(invalid) => {
            let mut lines = vec!["Answers failed validation:".to_string()];
            lines.extend(
                invalid
                    .detail
                    .iter()
                    .map(|error| format!("- {}: {}", error.field, error.code)),
            );
            lines
        }
    }
}

fn render_success(success: &EstimationSuccess) -> Vec<String> {
    let summary = &success.summary;
    let mut lines = vec![
        format!("{} [{}]", summary.title, summary.state.as_str()),
        summary.details.clone(),
    ];

    if !success.missing_fields.is_empty() {
        let missing: Vec<&str> = success
            .missing_fields
            .iter()
            .map(|key| key.name())
            .collect();
        lines.push(format!("Still needed: {}", missing.join(", ")));
        return lines;
    }

    lines.push(format!("Monthly total: {:.2}", summary.entitlement_sum));
    render_results(&mut lines, "Applicant", &success.results);
    render_results(&mut lines, "Applicant at 65", &success.future_client_results);
    if !success.partner_results.is_empty() {
        lines.push(format!(
            "Partner monthly total: {:.2} [{}]",
            summary.partner_entitlement_sum,
            summary.partner_state.as_str()
        ));
    }
    render_results(&mut lines, "Partner", &success.partner_results);
    render_results(&mut lines, "Partner at 65", &success.future_partner_results);
    lines
}

fn render_results(lines: &mut Vec<String>, heading: &str, results: &BenefitResults) {
    if results.is_empty() {
        return;
    }

    lines.push(format!("\n{heading}"));
    for (benefit, result) in results {
        lines.push(format!(
            "- {}: {} | {:.2}/month",
            benefit.as_str().to_ascii_uppercase(),
            result.eligibility.result.as_str(),
            result.entitlement.result
        ));
        lines.push(format!("  {}", result.card_detail.main_text));
    }
}

pub(crate) fn render_fields(answers: Option<&RawAnswers>) -> Vec<String> {
    let requirements: Option<FieldRequirements> = answers.map(resolve);

    field_catalog()
        .iter()
        .map(|config| {
            let marker = match &requirements {
                Some(requirements) if requirements.missing.contains(&config.key) => " (missing)",
                Some(requirements) if !requirements.is_visible(config.key) => " (hidden)",
                _ => "",
            };
            format!(
                "{:>3} {} [{:?}]{}",
                config.order,
                config.key.name(),
                config.category,
                marker
            )
        })
        .collect()
}
