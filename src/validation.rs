//! Form validation and sanitization pipeline
//!
//! A [`Pipeline`] is an ordered list of [`FieldRules`]. Each field runs its
//! checks in order and stops at the first failure; failures accumulate across
//! fields in declaration order. Sanitizers run regardless of the check outcome
//! so a rejected form can be shown again with cleaned values.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidateLength;

/// Raw submitted form: field name to raw string value
pub type RawForm = HashMap<String, String>;

/// Date format accepted on input and produced for form prefill
pub const ISO_DATE: &str = "%Y-%m-%d";

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub msg: String,
}

/// A pass/fail rule; text rules see the trimmed value, dates the raw one
#[derive(Debug, Clone)]
pub enum Check {
    /// At least one character
    NotEmpty(String),
    /// At most `max` characters
    MaxLength(u64, String),
    /// Letters and digits only
    Alphanumeric(String),
    /// `YYYY-MM-DD` calendar date
    IsoDate(String),
    /// Hyphenated identifier
    Identifier(String),
}

impl Check {
    pub fn check(&self, value: &str) -> Result<(), &str> {
        let passed = match self {
            Check::NotEmpty(_) => value.validate_length(Some(1), None, None),
            Check::MaxLength(max, _) => value.validate_length(None, Some(*max), None),
            Check::Alphanumeric(_) => value.chars().all(char::is_alphanumeric),
            Check::IsoDate(_) => parse_iso_date(value).is_some(),
            Check::Identifier(_) => Uuid::parse_str(value).is_ok(),
        };
        if passed {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    /// Whether the rule sees the trimmed value
    fn trims(&self) -> bool {
        !matches!(self, Check::IsoDate(_))
    }

    fn message(&self) -> &str {
        match self {
            Check::NotEmpty(msg)
            | Check::MaxLength(_, msg)
            | Check::Alphanumeric(msg)
            | Check::IsoDate(msg)
            | Check::Identifier(msg) => msg,
        }
    }
}

/// A transformation applied to the raw value, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    Trim,
    Escape,
    ToDate,
}

/// A field value after sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleaned {
    Text(String),
    Date(Option<NaiveDate>),
}

/// Rules for one form field
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub name: &'static str,
    /// An empty raw value skips every check
    pub optional: bool,
    pub checks: Vec<Check>,
    pub sanitizers: Vec<Sanitizer>,
}

impl FieldRules {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
            checks: Vec::new(),
            sanitizers: Vec::new(),
        }
    }

    /// Trimmed, non-empty, bounded, alphanumeric, stored escaped
    pub fn required_name(name: &'static str, label: &str, max: u64) -> Self {
        Self::new(name)
            .check(Check::NotEmpty(format!("{} must be specified.", label)))
            .check(Check::MaxLength(
                max,
                format!("{} must be at most {} characters.", label, max),
            ))
            .check(Check::Alphanumeric(format!(
                "{} has non-alphanumeric characters.",
                label
            )))
            .sanitize(Sanitizer::Trim)
            .sanitize(Sanitizer::Escape)
    }

    /// Trimmed, non-empty, stored escaped
    pub fn required_text(name: &'static str, message: &str) -> Self {
        Self::new(name)
            .check(Check::NotEmpty(message.to_string()))
            .sanitize(Sanitizer::Trim)
            .sanitize(Sanitizer::Escape)
    }

    /// May be left empty; otherwise bounded, stored escaped
    pub fn optional_text(name: &'static str, label: &str, max: u64) -> Self {
        Self::new(name)
            .optional()
            .check(Check::MaxLength(
                max,
                format!("{} must be at most {} characters.", label, max),
            ))
            .sanitize(Sanitizer::Trim)
            .sanitize(Sanitizer::Escape)
    }

    /// May be left empty; otherwise an ISO-8601 calendar date
    pub fn optional_date(name: &'static str, message: &str) -> Self {
        Self::new(name)
            .optional()
            .check(Check::IsoDate(message.to_string()))
            .sanitize(Sanitizer::ToDate)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizers.push(sanitizer);
        self
    }

    /// First failing check, if any
    fn validate(&self, raw: &str) -> Option<FieldError> {
        if self.optional && raw.is_empty() {
            return None;
        }
        self.checks.iter().find_map(|check| {
            let value = if check.trims() { raw.trim() } else { raw };
            check.check(value).err().map(|msg| FieldError {
                field: self.name,
                msg: msg.to_string(),
            })
        })
    }

    fn clean(&self, raw: &str) -> Cleaned {
        let mut text = raw.to_string();
        let mut date = None;
        let mut is_date = false;
        for sanitizer in &self.sanitizers {
            match sanitizer {
                Sanitizer::Trim => text = text.trim().to_string(),
                Sanitizer::Escape => text = tera::escape_html(&text),
                Sanitizer::ToDate => {
                    is_date = true;
                    date = parse_iso_date(&text);
                }
            }
        }
        if is_date {
            Cleaned::Date(date)
        } else {
            Cleaned::Text(text)
        }
    }
}

/// Ordered set of field rules
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    fields: Vec<FieldRules>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Run every field; missing fields count as empty strings
    pub fn run(&self, raw: &RawForm) -> Outcome {
        let mut cleaned = HashMap::with_capacity(self.fields.len());
        let mut errors = Vec::new();

        for rules in &self.fields {
            let value = raw.get(rules.name).map(String::as_str).unwrap_or("");
            if let Some(error) = rules.validate(value) {
                errors.push(error);
            }
            cleaned.insert(rules.name, rules.clean(value));
        }

        Outcome { cleaned, errors }
    }
}

/// Sanitized values plus any validation failures
#[derive(Debug, Clone)]
pub struct Outcome {
    cleaned: HashMap<&'static str, Cleaned>,
    errors: Vec<FieldError>,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Sanitized text; empty when the field is unknown or not text
    pub fn text(&self, name: &str) -> String {
        match self.cleaned.get(name) {
            Some(Cleaned::Text(text)) => text.clone(),
            _ => String::new(),
        }
    }

    /// Sanitized text, `None` when empty
    pub fn text_opt(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|text| !text.is_empty())
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.cleaned.get(name) {
            Some(Cleaned::Date(date)) => *date,
            _ => None,
        }
    }
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE).ok()
}
