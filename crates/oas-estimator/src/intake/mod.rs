//! Questionnaire intake: which questions apply, whether the answers hold
//! together, and the normalized input handed to benefit evaluation.

pub mod cards;
pub mod countries;
pub mod domain;
pub mod evaluator;
pub mod fields;
pub mod normalizer;
pub mod reference;
pub mod request;
pub mod requirements;
pub mod router;
pub mod service;
pub mod summary;
pub mod translations;
pub mod validation;

#[cfg(test)]
mod tests;

pub use cards::{BenefitResult, CardCollapsedText, CardContext, CardDetail, CardMeta, Link};
pub use domain::{
    FieldKey, FieldKind, FieldValue, Language, LegalStatus, MaritalStatus, PartnerBenefitStatus,
    RawAnswers,
};
pub use evaluator::{
    BenefitEvaluator, BenefitKey, BenefitOutcome, BenefitOutcomes, EligibilityResult,
    EntitlementResult, EntitlementResultType, EvaluatorError, ResultKey, ResultReason,
};
pub use fields::{field_catalog, field_config, FieldCategory, FieldConfig};
pub use normalizer::{
    normalize, normalize_household, Household, IncomeSummary, LegalStanding, MaritalStanding,
    PartnerBenefitStanding, ProcessedInput, ResidenceCountry,
};
pub use reference::{ReferenceEvaluator, ReferenceRates};
pub use request::{EstimationRequest, RequestError};
pub use requirements::{resolve, FieldRequirements, RequirementResolver, SummaryState};
pub use router::estimation_router;
pub use service::{
    EstimationError, EstimationResponse, EstimationService, EstimationSuccess, InvalidResponse,
};
pub use summary::{summary_state, BenefitResults, Summary};
pub use translations::{TranslationCatalog, TranslationError, Translations};
pub use validation::{
    FieldError, ValidatedAnswers, ValidatedPartner, ValidationErrorCode, ValidationErrors,
    ValidationSchema,
};
