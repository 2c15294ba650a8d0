//! Field-level validation of untrusted JSON payloads.
//!
//! Request bodies arrive as opaque `serde_json::Value`s. A [`Validator`] checks
//! their shape before anything deserializes or trusts them, reporting one
//! message per failing field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Result of validating a payload: overall verdict plus per-field messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// Build an outcome from collected errors; valid iff there are none.
    pub fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self::from_errors(errors)
    }

    /// `"field: message; field: message"` in field order.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Anything that can judge a raw request body.
pub trait Validator: Send + Sync {
    fn validate(&self, body: &Value) -> ValidationOutcome;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> ValidationOutcome + Send + Sync,
{
    fn validate(&self, body: &Value) -> ValidationOutcome {
        self(body)
    }
}

/// A single field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be present, non-null and not a blank string.
    Required,
    Email,
    /// Minimum length in characters (after trimming).
    MinLength(usize),
    /// Maximum length in characters (after trimming).
    MaxLength(usize),
    OneOf(&'static [&'static str]),
    /// 7 to 15 digits, optionally with a leading `+` and `-`, `(`, `)` or spaces.
    Phone,
}

/// Declarative per-field validator.
///
/// Rules run in declaration order and the first failure per field wins.
/// Absent optional fields (no [`Rule::Required`]) are skipped entirely.
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }
}

impl Validator for FieldValidator {
    fn validate(&self, body: &Value) -> ValidationOutcome {
        let mut errors = BTreeMap::new();

        for (name, rules) in &self.fields {
            let value = body.get(*name).filter(|v| is_present(v));

            let Some(value) = value else {
                if rules.contains(&Rule::Required) {
                    errors.insert((*name).to_string(), format!("{name} is required"));
                }
                continue;
            };

            if let Some(message) = rules.iter().find_map(|rule| check(*rule, name, value)) {
                errors.insert((*name).to_string(), message);
            }
        }

        ValidationOutcome::from_errors(errors)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn check(rule: Rule, name: &str, value: &Value) -> Option<String> {
    if rule == Rule::Required {
        return None;
    }

    let Some(text) = as_text(value) else {
        return Some(format!("{name} must be a string"));
    };

    match rule {
        Rule::Required => None,
        Rule::Email => (!is_valid_email(&text)).then(|| "Invalid email".to_string()),
        Rule::MinLength(min) => (text.chars().count() < min)
            .then(|| format!("{name} must be at least {min} characters")),
        Rule::MaxLength(max) => (text.chars().count() > max)
            .then(|| format!("{name} must be at most {max} characters")),
        Rule::OneOf(allowed) => (!allowed.contains(&text.as_str()))
            .then(|| format!("{name} must be one of: {}", allowed.join(", "))),
        Rule::Phone => (!is_valid_phone(&text)).then(|| "Invalid phone number".to_string()),
    }
}

/// Structural email check: `local@domain.tld`, no whitespace, one `@`.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

pub fn is_valid_phone(s: &str) -> bool {
    let body = s.strip_prefix('+').unwrap_or(s);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}
