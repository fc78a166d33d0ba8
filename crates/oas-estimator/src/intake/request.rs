use serde_json::Value;

use super::domain::{FieldKey, FieldKind, FieldValue, Language, RawAnswers};

const LANGUAGE_KEY: &str = "_language";

/// Rejected before any field requirement is resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected}, got '{value}'")]
    InvalidValue {
        field: FieldKey,
        expected: &'static str,
        value: String,
    },
    #[error("unsupported language '{0}'")]
    InvalidLanguage(String),
    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// Answers plus the response language, coerced from the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimationRequest {
    pub answers: RawAnswers,
    pub language: Language,
}

impl EstimationRequest {
    /// Coerces URL query pairs. Empty values count as unanswered; later duplicates win.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (name, raw) in pairs {
            let (name, raw) = (name.as_ref(), raw.as_ref().trim());
            if name == LANGUAGE_KEY {
                request.language = parse_language(raw)?;
                continue;
            }

            let key = field_key(name)?;
            if raw.is_empty() {
                request.answers.remove(key);
                continue;
            }
            request.answers.insert(key, coerce_text(key, raw)?);
        }
        Ok(request)
    }

    /// Coerces a JSON object. `null` and empty strings count as unanswered.
    pub fn from_json(body: &Value) -> Result<Self, RequestError> {
        let object = body.as_object().ok_or(RequestError::NotAnObject)?;

        let mut request = Self::default();
        for (name, value) in object {
            if name == LANGUAGE_KEY {
                request.language = match value {
                    Value::String(raw) => parse_language(raw)?,
                    Value::Null => Language::default(),
                    other => return Err(RequestError::InvalidLanguage(other.to_string())),
                };
                continue;
            }

            let key = field_key(name)?;
            if let Some(value) = coerce_json(key, value)? {
                request.answers.insert(key, value);
            }
        }
        Ok(request)
    }
}

fn field_key(name: &str) -> Result<FieldKey, RequestError> {
    FieldKey::from_name(name).ok_or_else(|| RequestError::UnknownField(name.to_string()))
}

fn parse_language(raw: &str) -> Result<Language, RequestError> {
    if raw.is_empty() {
        return Ok(Language::default());
    }
    raw.parse()
        .map_err(|_| RequestError::InvalidLanguage(raw.to_string()))
}

fn invalid(key: FieldKey, value: impl ToString) -> RequestError {
    RequestError::InvalidValue {
        field: key,
        expected: key.kind().label(),
        value: value.to_string(),
    }
}

fn coerce_text(key: FieldKey, raw: &str) -> Result<FieldValue, RequestError> {
    match key.kind() {
        FieldKind::Number | FieldKind::Integer => raw
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(FieldValue::Number)
            .ok_or_else(|| invalid(key, raw)),
        FieldKind::Boolean => match raw {
            "true" => Ok(FieldValue::Boolean(true)),
            "false" => Ok(FieldValue::Boolean(false)),
            _ => Err(invalid(key, raw)),
        },
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
    }
}

fn coerce_json(key: FieldKey, value: &Value) -> Result<Option<FieldValue>, RequestError> {
    match value {
        Value::Null => Ok(None),
        Value::String(raw) if raw.trim().is_empty() => Ok(None),
        Value::String(raw) => coerce_text(key, raw.trim()).map(Some),
        Value::Number(number) => match (key.kind(), number.as_f64()) {
            (FieldKind::Number | FieldKind::Integer, Some(number)) => {
                Ok(Some(FieldValue::Number(number)))
            }
            _ => Err(invalid(key, number)),
        },
        Value::Bool(flag) if key.kind() == FieldKind::Boolean => {
            Ok(Some(FieldValue::Boolean(*flag)))
        }
        other => Err(invalid(key, other)),
    }
}
